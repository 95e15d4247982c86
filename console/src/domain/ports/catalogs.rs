//! Driving port for catalog CRUD.

use async_trait::async_trait;

use crate::domain::{Catalog, DomainError};

/// Thin REST-verb surface over the catalog resource.
#[async_trait]
pub trait CatalogsGateway: Send + Sync {
    /// Fetch every catalog.
    async fn list(&self) -> Result<Vec<Catalog>, DomainError>;
    /// Fetch one catalog by id.
    async fn get(&self, id: u64) -> Result<Catalog, DomainError>;
    /// Create a catalog and return the stored record.
    async fn create(&self, catalog: &Catalog) -> Result<Catalog, DomainError>;
    /// Replace a catalog and return the stored record.
    async fn update(&self, id: u64, catalog: &Catalog) -> Result<Catalog, DomainError>;
    /// Delete a catalog.
    async fn delete(&self, id: u64) -> Result<(), DomainError>;
}
