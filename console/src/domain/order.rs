//! Orders and their owned line items.

use chrono::{DateTime, Utc};

/// An order placed for one customer.
///
/// Lines are owned: they are created and destroyed only through the order's
/// own lifecycle (see the submission service).
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    /// Backend identifier (`idPedido`).
    pub id: u64,
    /// Owning customer (`idCliente`).
    pub customer_id: u64,
    /// Creation timestamp; set by the final subtotal update on the create
    /// path, so it may be absent on a freshly created parent.
    pub placed_at: Option<DateTime<Utc>>,
    /// Completion flag (`estadoPedido`).
    pub completed: bool,
    /// Sum of line subtotals as last written to the backend.
    pub subtotal: f64,
    /// Optional free-text notes (`notasAdicionales`).
    pub notes: Option<String>,
}

/// One product entry within an order.
///
/// ## Invariants
/// - `quantity` is strictly positive.
/// - `unit_price` is the product's price snapshot at line creation and is
///   never re-read from the product afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    /// Backend identifier (`idDetallePedido`); absent until persisted.
    pub id: Option<u64>,
    /// Owning order.
    pub order_id: u64,
    /// Referenced product (no ownership).
    pub product_id: u64,
    /// Units ordered.
    pub quantity: u32,
    /// Price snapshot taken when the line was composed.
    pub unit_price: f64,
}

impl OrderLine {
    /// Line subtotal: quantity times the unit-price snapshot.
    pub fn subtotal(&self) -> f64 {
        f64::from(self.quantity) * self.unit_price
    }
}
