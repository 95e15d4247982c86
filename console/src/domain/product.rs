//! Product catalog entries.

use crate::domain::DomainError;
use crate::domain::validation::{self, FieldViolation};

/// Placeholder image applied when a product is saved without one.
pub const DEFAULT_IMAGE_URL: &str = "https://www.idelcosa.com/img/default.jpg";

/// A sellable product belonging to one catalog.
///
/// ## Invariants
/// - `price` is never negative.
/// - `availability` is the backend-declared stock and never negative.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Backend identifier (`idProducto`).
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Unit price in the store currency.
    pub price: f64,
    /// Declared stock on hand.
    pub availability: u32,
    /// Owning catalog (`idCatalogo`).
    pub catalog_id: u64,
    /// Optional image location; blank values are replaced with
    /// [`DEFAULT_IMAGE_URL`] before submit.
    pub image_url: Option<String>,
}

impl Product {
    /// Run the product form checks.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidRequest` error whose details name each failing
    /// field.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut violations: Vec<FieldViolation> = Vec::new();
        violations.extend(validation::require("nombre", &self.name));
        violations.extend(validation::require("descripcion", &self.description));
        violations.extend(validation::non_negative("precio", self.price));
        violations.extend(validation::chosen("idCatalogo", self.catalog_id));
        validation::into_result("product", violations)
    }

    /// Image URL with the blank-to-default substitution applied.
    pub fn image_url_or_default(&self) -> &str {
        match self.image_url.as_deref() {
            Some(url) if !url.trim().is_empty() => url,
            _ => DEFAULT_IMAGE_URL,
        }
    }
}
