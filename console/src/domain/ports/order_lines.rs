//! Driving port for order line items.

use async_trait::async_trait;

use crate::domain::{DomainError, OrderLine};

/// Thin surface over the order-line resource. Lines are only ever written
/// through their parent order's lifecycle.
#[async_trait]
pub trait OrderLinesGateway: Send + Sync {
    /// Persist one line and return the stored record (with its id).
    async fn create(&self, line: &OrderLine) -> Result<OrderLine, DomainError>;
    /// Fetch the persisted lines of one order.
    async fn for_order(&self, order_id: u64) -> Result<Vec<OrderLine>, DomainError>;
    /// Delete one line by its own id.
    async fn delete(&self, line_id: u64) -> Result<(), DomainError>;
    /// Whether any persisted line references the product (delete guard).
    async fn product_referenced(&self, product_id: u64) -> Result<bool, DomainError>;
}
