//! Catalogs grouping the products on offer.

use crate::domain::DomainError;
use crate::domain::validation::{self, FieldViolation};

/// A named product grouping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    /// Backend identifier (`idCatalogo`).
    pub id: u64,
    /// Display name; expected unique among catalogs (advisory, client-side).
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Optional image location.
    pub image_url: Option<String>,
}

impl Catalog {
    /// Run the catalog form checks.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidRequest` error whose details name each failing
    /// field.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut violations: Vec<FieldViolation> = Vec::new();
        violations.extend(validation::require("nombre", &self.name));
        violations.extend(validation::require("descripcion", &self.description));
        validation::into_result("catalog", violations)
    }
}

/// Advisory uniqueness check run before submitting a catalog.
///
/// The backend does not guarantee name uniqueness; this pre-check merely
/// keeps the obvious duplicates out. `editing_id` excludes the catalog being
/// edited from the comparison.
///
/// # Errors
///
/// Returns a `Conflict` error naming the duplicate.
pub fn ensure_unique_name(
    existing: &[Catalog],
    candidate: &str,
    editing_id: Option<u64>,
) -> Result<(), DomainError> {
    let wanted = candidate.trim();
    let clash = existing.iter().find(|catalog| {
        editing_id != Some(catalog.id) && catalog.name.trim().eq_ignore_ascii_case(wanted)
    });
    match clash {
        Some(catalog) => Err(DomainError::conflict(format!(
            "a catalog named '{}' already exists (id {})",
            catalog.name, catalog.id
        ))),
        None => Ok(()),
    }
}
