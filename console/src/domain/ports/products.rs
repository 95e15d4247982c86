//! Driving port for product CRUD.

use async_trait::async_trait;

use crate::domain::{DomainError, Product};

/// Thin REST-verb surface over the product resource. No retry, no caching,
/// no request deduplication; callers see the gateway's error unchanged.
#[async_trait]
pub trait ProductsGateway: Send + Sync {
    /// Fetch every product.
    async fn list(&self) -> Result<Vec<Product>, DomainError>;
    /// Fetch one product by id.
    async fn get(&self, id: u64) -> Result<Product, DomainError>;
    /// Create a product and return the stored record.
    async fn create(&self, product: &Product) -> Result<Product, DomainError>;
    /// Replace a product and return the stored record.
    async fn update(&self, id: u64, product: &Product) -> Result<Product, DomainError>;
    /// Delete a product.
    async fn delete(&self, id: u64) -> Result<(), DomainError>;
}
