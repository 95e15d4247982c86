//! Advisory referential guards run before destructive calls.
//!
//! The backend offers no transactional integrity across resources, so the
//! console issues a pre-check read before each delete. The checks are
//! advisory: another operator can create a reference between the check and
//! the delete, and nothing here closes that race.

use std::sync::Arc;

use crate::domain::DomainError;
use crate::domain::ports::{OrderLinesGateway, OrdersGateway, ProductsGateway};

/// Pre-delete reference checks for customers, products, and catalogs.
pub struct ReferentialGuards {
    orders: Arc<dyn OrdersGateway>,
    lines: Arc<dyn OrderLinesGateway>,
    products: Arc<dyn ProductsGateway>,
}

impl ReferentialGuards {
    /// Wire the guards from their collaborators.
    pub fn new(
        orders: Arc<dyn OrdersGateway>,
        lines: Arc<dyn OrderLinesGateway>,
        products: Arc<dyn ProductsGateway>,
    ) -> Self {
        Self {
            orders,
            lines,
            products,
        }
    }

    /// A customer referenced by any order must not be deleted.
    ///
    /// # Errors
    ///
    /// `Conflict` when a referencing order exists; otherwise the read error.
    pub async fn ensure_customer_deletable(&self, customer_id: u64) -> Result<(), DomainError> {
        let orders = self.orders.list().await?;
        let referencing = orders
            .iter()
            .filter(|order| order.customer_id == customer_id)
            .count();
        if referencing > 0 {
            return Err(DomainError::conflict(format!(
                "customer {customer_id} is referenced by {referencing} order(s); delete those first"
            )));
        }
        Ok(())
    }

    /// A product referenced by any order line must not be deleted.
    ///
    /// # Errors
    ///
    /// `Conflict` when a referencing line exists; otherwise the read error.
    pub async fn ensure_product_deletable(&self, product_id: u64) -> Result<(), DomainError> {
        if self.lines.product_referenced(product_id).await? {
            return Err(DomainError::conflict(format!(
                "product {product_id} appears in existing orders; remove those lines first"
            )));
        }
        Ok(())
    }

    /// A catalog that still owns products must not be deleted.
    ///
    /// # Errors
    ///
    /// `Conflict` when an owned product exists; otherwise the read error.
    pub async fn ensure_catalog_deletable(&self, catalog_id: u64) -> Result<(), DomainError> {
        let products = self.products.list().await?;
        let owned = products
            .iter()
            .filter(|product| product.catalog_id == catalog_id)
            .count();
        if owned > 0 {
            return Err(DomainError::conflict(format!(
                "catalog {catalog_id} still contains {owned} product(s); move or delete them first"
            )));
        }
        Ok(())
    }
}
