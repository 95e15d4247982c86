//! Order composition: product selection against live stock.
//!
//! The draft is pure client-side bookkeeping. "Remaining stock" is derived
//! from the availability declared by the last catalog load minus what the
//! draft has reserved; it is a UX hint with no server-side reservation
//! behind it, so the submission service still has to handle a backend
//! rejection at commit time.

use std::collections::HashMap;

use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::order::{Order, OrderLine};
use crate::domain::product::Product;

/// One selected product within a draft.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionLine {
    /// Referenced product.
    pub product_id: u64,
    /// Product name snapshot for rendering.
    pub name: String,
    /// Units currently selected; always ≥ 1.
    pub quantity: u32,
    /// Unit price snapshot taken when the line entered the selection (or the
    /// persisted snapshot when hydrated for edit). Never re-read afterwards.
    pub unit_price: f64,
}

impl SelectionLine {
    /// Line subtotal: quantity times the unit-price snapshot.
    pub fn subtotal(&self) -> f64 {
        f64::from(self.quantity) * self.unit_price
    }
}

/// Outcome of an add attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line entered the selection with quantity one.
    Added,
    /// The product was already selected; its quantity grew by one.
    Incremented,
    /// No remaining stock; the selection is unchanged.
    OutOfStock,
}

/// Why a draft cannot be submitted yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DraftNotReady {
    /// No customer has been chosen.
    #[error("choose a customer before submitting the order")]
    NoCustomer,
    /// The selection is empty.
    #[error("select at least one product before submitting the order")]
    EmptySelection,
}

/// An order under composition.
#[derive(Debug, Clone, Default)]
pub struct OrderDraft {
    customer_id: Option<u64>,
    lines: Vec<SelectionLine>,
    availability: HashMap<u64, u32>,
    notes: Option<String>,
    rejected_adds: u32,
}

impl OrderDraft {
    /// Start an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a draft from a persisted order for editing.
    ///
    /// Each persisted line is joined against the loaded product list; a line
    /// whose product vanished from the catalog is dropped with a warning.
    /// Availability is seeded so quantities already committed to this order
    /// do not double-count against the backend-declared stock.
    pub fn hydrate(order: &Order, persisted: &[OrderLine], products: &[Product]) -> Self {
        let mut draft = Self::new();
        draft.customer_id = Some(order.customer_id);
        draft.notes = order.notes.clone();
        draft.load_catalog(products);
        for line in persisted {
            let Some(product) = products.iter().find(|p| p.id == line.product_id) else {
                warn!(
                    product_id = line.product_id,
                    order_id = order.id,
                    "dropping order line: product no longer in the catalog"
                );
                continue;
            };
            // Committed units were already subtracted from the declared
            // stock by the backend; give them back for this draft.
            if let Some(declared) = draft.availability.get_mut(&product.id) {
                *declared = declared.saturating_add(line.quantity);
            }
            draft.lines.push(SelectionLine {
                product_id: product.id,
                name: product.name.clone(),
                quantity: line.quantity.max(1),
                unit_price: line.unit_price,
            });
        }
        draft
    }

    /// Record the catalog's declared availability for stock accounting.
    pub fn load_catalog(&mut self, products: &[Product]) {
        for product in products {
            self.availability.insert(product.id, product.availability);
        }
    }

    /// Choose the customer the order is for.
    pub fn choose_customer(&mut self, customer_id: u64) {
        self.customer_id = Some(customer_id);
    }

    /// Chosen customer, when any.
    pub fn customer_id(&self) -> Option<u64> {
        self.customer_id
    }

    /// Attach or clear the free-text notes.
    pub fn set_notes(&mut self, notes: Option<String>) {
        self.notes = notes.filter(|text| !text.trim().is_empty());
    }

    /// Free-text notes, when any.
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Current selection, in insertion order.
    pub fn lines(&self) -> &[SelectionLine] {
        self.lines.as_slice()
    }

    /// Units of `product_id` still addable: declared availability minus what
    /// the selection has reserved.
    pub fn remaining_stock(&self, product_id: u64) -> u32 {
        let declared = self.availability.get(&product_id).copied().unwrap_or(0);
        declared.saturating_sub(self.selected_quantity(product_id))
    }

    /// Units of `product_id` currently reserved by the selection.
    pub fn selected_quantity(&self, product_id: u64) -> u32 {
        self.lines
            .iter()
            .filter(|line| line.product_id == product_id)
            .map(|line| line.quantity)
            .sum()
    }

    /// How many add attempts bounced off zero remaining stock. Each attempt
    /// is a silent no-op; the counter keeps them observable.
    pub fn rejected_adds(&self) -> u32 {
        self.rejected_adds
    }

    /// Add one unit of `product` to the selection.
    ///
    /// At zero remaining stock this is a counted no-op, not an error.
    pub fn add_product(&mut self, product: &Product) -> AddOutcome {
        self.availability
            .entry(product.id)
            .or_insert(product.availability);
        if self.remaining_stock(product.id) == 0 {
            debug!(product_id = product.id, "add ignored: no remaining stock");
            self.rejected_adds += 1;
            return AddOutcome::OutOfStock;
        }
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product_id == product.id)
        {
            line.quantity += 1;
            return AddOutcome::Incremented;
        }
        self.lines.push(SelectionLine {
            product_id: product.id,
            name: product.name.clone(),
            quantity: 1,
            unit_price: product.price,
        });
        AddOutcome::Added
    }

    /// Set a selected line's quantity, clamped to
    /// `[1, declared availability]` (the line's own reservation counts
    /// toward the upper bound). Returns the resulting quantity, or `None`
    /// when the product is not selected.
    pub fn set_quantity(&mut self, product_id: u64, quantity: u32) -> Option<u32> {
        // A product appears at most once in the selection, so the line's own
        // reservation is simply absorbed by clamping against the declared
        // figure rather than the remaining one.
        let declared = self.availability.get(&product_id).copied().unwrap_or(0);
        let line = self
            .lines
            .iter_mut()
            .find(|line| line.product_id == product_id)?;
        let clamped = quantity.clamp(1, declared.max(1));
        line.quantity = clamped;
        Some(clamped)
    }

    /// Nudge a selected line's quantity by `delta` (typically ±1), with the
    /// same clamping as [`OrderDraft::set_quantity`].
    pub fn adjust_quantity(&mut self, product_id: u64, delta: i32) -> Option<u32> {
        let current = self.line_quantity(product_id)?;
        let wanted = i64::from(current) + i64::from(delta);
        let wanted = u32::try_from(wanted.max(1)).unwrap_or(1);
        self.set_quantity(product_id, wanted)
    }

    /// Drop a line, returning its reserved units to the pool.
    pub fn remove_line(&mut self, product_id: u64) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.product_id != product_id);
        before != self.lines.len()
    }

    /// Running total: the sum of quantity × unit-price snapshot over the
    /// selection. Recomputed from scratch on every call.
    pub fn total(&self) -> f64 {
        self.lines.iter().map(SelectionLine::subtotal).sum()
    }

    /// Whether the draft can be submitted.
    ///
    /// # Errors
    ///
    /// Names the first unmet requirement.
    pub fn ensure_ready(&self) -> Result<(), DraftNotReady> {
        if self.customer_id.is_none() {
            return Err(DraftNotReady::NoCustomer);
        }
        if self.lines.is_empty() {
            return Err(DraftNotReady::EmptySelection);
        }
        Ok(())
    }

    fn line_quantity(&self, product_id: u64) -> Option<u32> {
        self.lines
            .iter()
            .find(|line| line.product_id == product_id)
            .map(|line| line.quantity)
    }
}
