//! Multi-step order persistence against a backend with no transactional
//! multi-resource API.
//!
//! Submission is an ordered list of steps executed strictly in sequence,
//! each awaited before the next. Every committed step records a named
//! compensation, but compensations are **declared, never executed**: a
//! mid-saga failure leaves a partially written order behind, an accepted
//! risk that is made visible in a typed error rather than a log line only.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::Clock;
use thiserror::Error;
use tracing::error;

use crate::domain::DomainError;
use crate::domain::draft::{DraftNotReady, OrderDraft};
use crate::domain::order::{Order, OrderLine};
use crate::domain::ports::{OrderLinesGateway, OrdersGateway};

/// Write model for creating the order parent. The create path always writes
/// a zero subtotal and no timestamp; the closing update fills both in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    /// Owning customer.
    pub customer_id: u64,
    /// Optional free-text notes.
    pub notes: Option<String>,
}

/// Write model for replacing the order parent.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderUpdate {
    /// Owning customer (preserved on the edit path).
    pub customer_id: u64,
    /// Completion flag.
    pub completed: bool,
    /// Recomputed subtotal.
    pub subtotal: f64,
    /// Creation timestamp: set once by the create path's closing update,
    /// preserved by the edit path.
    pub placed_at: Option<DateTime<Utc>>,
    /// Optional free-text notes.
    pub notes: Option<String>,
}

/// One committed saga step and the compensation a rollback would run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedStep {
    /// What was written.
    pub action: String,
    /// What undoing it would take (informational only).
    pub compensation: String,
}

impl CompletedStep {
    fn new(action: impl Into<String>, compensation: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            compensation: compensation.into(),
        }
    }
}

/// How a submission failed.
#[derive(Debug, Error)]
pub enum OrderSubmitError {
    /// The draft was not submittable; nothing was sent.
    #[error(transparent)]
    NotReady(#[from] DraftNotReady),
    /// The saga failed before writing anything.
    #[error("order submission failed before any write: {0}")]
    Rejected(#[from] DomainError),
    /// The saga failed mid-flight, leaving the order partially written.
    ///
    /// A backend stock rejection during line creation lands here: it is
    /// recoverable (adjust the draft, resubmit), but the parent order
    /// already exists.
    #[error("order {order_id} is partially written; step `{step}` failed: {source}")]
    Partial {
        /// The order the partial state belongs to.
        order_id: u64,
        /// The step that failed.
        step: String,
        /// Steps that had already committed, with their declared
        /// compensations.
        completed: Vec<CompletedStep>,
        /// The underlying failure.
        #[source]
        source: DomainError,
    },
}

/// Sequential order persistence: create, full-replace edit, and deletion.
pub struct OrderSubmitService {
    orders: Arc<dyn OrdersGateway>,
    lines: Arc<dyn OrderLinesGateway>,
    clock: Arc<dyn Clock>,
}

impl OrderSubmitService {
    /// Wire the service from its collaborators.
    pub fn new(
        orders: Arc<dyn OrdersGateway>,
        lines: Arc<dyn OrderLinesGateway>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            orders,
            lines,
            clock,
        }
    }

    /// Create path: parent with zero subtotal, then one line per selection
    /// entry in order, then the closing subtotal-and-timestamp update.
    ///
    /// # Errors
    ///
    /// [`OrderSubmitError::NotReady`] when the draft is incomplete,
    /// [`OrderSubmitError::Rejected`] when the parent create fails, and
    /// [`OrderSubmitError::Partial`] on any later step.
    pub async fn submit_new(&self, draft: &OrderDraft) -> Result<Order, OrderSubmitError> {
        draft.ensure_ready()?;
        let Some(customer_id) = draft.customer_id() else {
            return Err(DraftNotReady::NoCustomer.into());
        };

        let created = self
            .orders
            .create(&NewOrder {
                customer_id,
                notes: draft.notes().map(str::to_owned),
            })
            .await?;
        let mut steps = vec![CompletedStep::new(
            format!("created order {}", created.id),
            format!("delete order {}", created.id),
        )];

        self.create_lines(created.id, draft, &mut steps).await?;

        let update = OrderUpdate {
            customer_id,
            completed: false,
            subtotal: draft.total(),
            placed_at: Some(self.clock.utc()),
            notes: draft.notes().map(str::to_owned),
        };
        self.close_out(created.id, &update, steps).await
    }

    /// Edit path: fetch the persisted lines, delete every one (full replace,
    /// not a diff), recreate from the current selection, then update the
    /// parent's subtotal preserving its customer and original timestamp.
    ///
    /// # Errors
    ///
    /// As [`OrderSubmitService::submit_new`], except the fetch failing first
    /// reports [`OrderSubmitError::Rejected`].
    pub async fn submit_edit(
        &self,
        order: &Order,
        draft: &OrderDraft,
    ) -> Result<Order, OrderSubmitError> {
        draft.ensure_ready()?;

        let persisted = self.lines.for_order(order.id).await?;
        let mut steps = Vec::new();
        self.delete_lines(order.id, &persisted, &mut steps).await?;
        self.create_lines(order.id, draft, &mut steps).await?;

        let update = OrderUpdate {
            customer_id: order.customer_id,
            completed: order.completed,
            subtotal: draft.total(),
            placed_at: order.placed_at,
            notes: draft.notes().map(str::to_owned),
        };
        self.close_out(order.id, &update, steps).await
    }

    /// Delete an order: its persisted lines first (the backend restores
    /// stock as each line goes), then the parent.
    ///
    /// # Errors
    ///
    /// [`OrderSubmitError::Rejected`] when the line fetch fails;
    /// [`OrderSubmitError::Partial`] when a delete mid-sequence fails.
    pub async fn delete_order(&self, order_id: u64) -> Result<(), OrderSubmitError> {
        let persisted = self.lines.for_order(order_id).await?;
        let mut steps = Vec::new();
        self.delete_lines(order_id, &persisted, &mut steps).await?;
        self.orders
            .delete(order_id)
            .await
            .map_err(|source| partial(order_id, "delete order parent", steps, source))
    }

    async fn create_lines(
        &self,
        order_id: u64,
        draft: &OrderDraft,
        steps: &mut Vec<CompletedStep>,
    ) -> Result<(), OrderSubmitError> {
        for line in draft.lines() {
            let record = OrderLine {
                id: None,
                order_id,
                product_id: line.product_id,
                quantity: line.quantity,
                unit_price: line.unit_price,
            };
            let step = format!("create line for product {}", line.product_id);
            let stored = self
                .lines
                .create(&record)
                .await
                .map_err(|source| partial(order_id, &step, steps.clone(), source))?;
            let compensation = match stored.id {
                Some(line_id) => format!("delete line {line_id}"),
                None => format!("delete line for product {} by lookup", line.product_id),
            };
            steps.push(CompletedStep::new(step, compensation));
        }
        Ok(())
    }

    async fn delete_lines(
        &self,
        order_id: u64,
        persisted: &[OrderLine],
        steps: &mut Vec<CompletedStep>,
    ) -> Result<(), OrderSubmitError> {
        for line in persisted {
            let Some(line_id) = line.id else {
                continue;
            };
            let step = format!("delete line {line_id}");
            self.lines
                .delete(line_id)
                .await
                .map_err(|source| partial(order_id, &step, steps.clone(), source))?;
            steps.push(CompletedStep::new(
                step,
                format!(
                    "recreate line for product {} x{} at {}",
                    line.product_id, line.quantity, line.unit_price
                ),
            ));
        }
        Ok(())
    }

    async fn close_out(
        &self,
        order_id: u64,
        update: &OrderUpdate,
        steps: Vec<CompletedStep>,
    ) -> Result<Order, OrderSubmitError> {
        self.orders
            .update(order_id, update)
            .await
            .map_err(|source| partial(order_id, "update order subtotal", steps, source))
    }
}

fn partial(
    order_id: u64,
    step: &str,
    completed: Vec<CompletedStep>,
    source: DomainError,
) -> OrderSubmitError {
    error!(
        order_id,
        step,
        committed_steps = completed.len(),
        error = %source,
        "order submission left partial state; no rollback is attempted"
    );
    OrderSubmitError::Partial {
        order_id,
        step: step.to_owned(),
        completed,
        source,
    }
}

#[cfg(test)]
mod tests;
