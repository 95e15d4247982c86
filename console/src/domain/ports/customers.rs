//! Driving port for customer CRUD.

use async_trait::async_trait;

use crate::domain::{Customer, DomainError};

/// Thin REST-verb surface over the customer resource.
#[async_trait]
pub trait CustomersGateway: Send + Sync {
    /// Fetch every customer.
    async fn list(&self) -> Result<Vec<Customer>, DomainError>;
    /// Fetch one customer by id.
    async fn get(&self, id: u64) -> Result<Customer, DomainError>;
    /// Create a customer and return the stored record.
    async fn create(&self, customer: &Customer) -> Result<Customer, DomainError>;
    /// Replace a customer and return the stored record.
    async fn update(&self, id: u64, customer: &Customer) -> Result<Customer, DomainError>;
    /// Delete a customer.
    async fn delete(&self, id: u64) -> Result<(), DomainError>;
}
