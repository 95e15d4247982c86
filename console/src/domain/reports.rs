//! Sales report aggregation (administrator-only screen).
//!
//! Pure functions over already-fetched data; the shell supplies the orders,
//! lines, products, and customers and renders the resulting tables. Chart
//! rendering stays with an external surface.

use chrono::{DateTime, Utc};

use crate::domain::customer::Customer;
use crate::domain::order::{Order, OrderLine};
use crate::domain::product::Product;

/// How many rows the top-product and top-customer tables keep.
pub const TOP_ENTRIES: usize = 5;

/// Name shown when a referenced product or customer no longer exists.
const UNKNOWN: &str = "unknown";

/// Inclusive reporting window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// First instant included.
    pub from: DateTime<Utc>,
    /// Last instant included.
    pub to: DateTime<Utc>,
}

impl DateRange {
    /// Whether `at` falls inside the window.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.from <= at && at <= self.to
    }
}

/// Units sold of one product across the window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSales {
    /// Product identifier.
    pub product_id: u64,
    /// Product name, or a placeholder when it vanished.
    pub name: String,
    /// Total units across all in-window orders.
    pub quantity: u64,
}

/// Spend of one customer across the window.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerSales {
    /// Customer identifier.
    pub customer_id: u64,
    /// Customer name, or a placeholder when it vanished.
    pub name: String,
    /// Summed order subtotals.
    pub total: f64,
}

/// The assembled report.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesSummary {
    /// Reporting window.
    pub range: DateRange,
    /// Revenue: the sum of in-window order subtotals.
    pub revenue: f64,
    /// Top products by units sold, at most [`TOP_ENTRIES`].
    pub top_products: Vec<ProductSales>,
    /// Top customers by spend, at most [`TOP_ENTRIES`].
    pub top_customers: Vec<CustomerSales>,
}

/// Aggregate a sales summary over `range`.
///
/// Orders without a creation timestamp are skipped: they are parents whose
/// closing update never landed, so their subtotal is not trustworthy either.
pub fn sales_summary(
    range: DateRange,
    orders: &[Order],
    lines: &[OrderLine],
    products: &[Product],
    customers: &[Customer],
) -> SalesSummary {
    let in_window: Vec<&Order> = orders
        .iter()
        .filter(|order| order.placed_at.is_some_and(|at| range.contains(at)))
        .collect();

    let revenue = in_window.iter().map(|order| order.subtotal).sum();

    let mut product_quantities: Vec<(u64, u64)> = Vec::new();
    for line in lines {
        if !in_window.iter().any(|order| order.id == line.order_id) {
            continue;
        }
        match product_quantities
            .iter_mut()
            .find(|(id, _)| *id == line.product_id)
        {
            Some((_, quantity)) => *quantity += u64::from(line.quantity),
            None => product_quantities.push((line.product_id, u64::from(line.quantity))),
        }
    }
    product_quantities.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    let top_products = product_quantities
        .into_iter()
        .take(TOP_ENTRIES)
        .map(|(product_id, quantity)| ProductSales {
            product_id,
            name: products
                .iter()
                .find(|product| product.id == product_id)
                .map_or_else(|| UNKNOWN.to_owned(), |product| product.name.clone()),
            quantity,
        })
        .collect();

    let mut customer_totals: Vec<(u64, f64)> = Vec::new();
    for order in &in_window {
        match customer_totals
            .iter_mut()
            .find(|(id, _)| *id == order.customer_id)
        {
            Some((_, total)) => *total += order.subtotal,
            None => customer_totals.push((order.customer_id, order.subtotal)),
        }
    }
    customer_totals.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    let top_customers = customer_totals
        .into_iter()
        .take(TOP_ENTRIES)
        .map(|(customer_id, total)| CustomerSales {
            customer_id,
            name: customers
                .iter()
                .find(|customer| customer.id == customer_id)
                .map_or_else(|| UNKNOWN.to_owned(), |customer| customer.name.clone()),
            total,
        })
        .collect();

    SalesSummary {
        range,
        revenue,
        top_products,
        top_customers,
    }
}
