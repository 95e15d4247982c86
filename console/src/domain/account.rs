//! Operator accounts managed through the administrator screens.

use zeroize::Zeroizing;

use crate::domain::DomainError;
use crate::domain::role::Role;
use crate::domain::validation::{self, FieldViolation};

/// A user account as listed by the backend. The credential is write-only and
/// never part of this read model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    /// Backend identifier.
    pub id: u64,
    /// Login name (`usuario`).
    pub username: String,
    /// Contact email.
    pub email: String,
    /// Whether the account may sign in (`activo`).
    pub active: bool,
    /// Assigned role.
    pub role: Role,
}

/// The write model for creating or updating an account. Carries the
/// credential, which is zeroized on drop and never rendered anywhere.
#[derive(Debug, Clone)]
pub struct AccountDraft {
    /// Login name (`usuario`).
    pub username: String,
    /// Contact email.
    pub email: String,
    /// Credential (`clave`), write-only.
    pub secret: Zeroizing<String>,
    /// Whether the account may sign in.
    pub active: bool,
    /// Assigned role.
    pub role: Role,
}

impl AccountDraft {
    /// Run the account form checks.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidRequest` error whose details name each failing
    /// field.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut violations: Vec<FieldViolation> = Vec::new();
        violations.extend(validation::require("usuario", &self.username));
        if let Some(missing) = validation::require("email", &self.email) {
            violations.push(missing);
        } else {
            violations.extend(validation::email_format("email", &self.email));
        }
        violations.extend(validation::require("clave", &self.secret));
        validation::into_result("account", violations)
    }
}
