//! Driving port for order CRUD and status changes.

use async_trait::async_trait;

use crate::domain::{DomainError, Order};
use crate::domain::order_saga::{NewOrder, OrderUpdate};

/// Thin REST-verb surface over the order resource.
///
/// Creating and updating take dedicated write models because the create path
/// deliberately writes a zero subtotal and no timestamp; the submission
/// service fills those in with a follow-up update.
#[async_trait]
pub trait OrdersGateway: Send + Sync {
    /// Fetch every order.
    async fn list(&self) -> Result<Vec<Order>, DomainError>;
    /// Fetch one order by id.
    async fn get(&self, id: u64) -> Result<Order, DomainError>;
    /// Create the order parent and return the stored record (with its id).
    async fn create(&self, order: &NewOrder) -> Result<Order, DomainError>;
    /// Replace the order parent.
    async fn update(&self, id: u64, order: &OrderUpdate) -> Result<Order, DomainError>;
    /// Flip the completion flag.
    async fn set_completed(&self, id: u64, completed: bool) -> Result<Order, DomainError>;
    /// Delete the order parent (lines are removed separately beforehand).
    async fn delete(&self, id: u64) -> Result<(), DomainError>;
}
