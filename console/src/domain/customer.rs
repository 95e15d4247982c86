//! Store customers (the parties orders are placed for).

use crate::domain::DomainError;
use crate::domain::validation::{self, FieldViolation};

/// A customer record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    /// Backend identifier (`idCliente`).
    pub id: u64,
    /// Full name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone, at most nine digits.
    pub phone: String,
    /// Postal address.
    pub address: String,
    /// Optional image location.
    pub image_url: Option<String>,
}

impl Customer {
    /// Run the customer form checks.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidRequest` error whose details name each failing
    /// field.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut violations: Vec<FieldViolation> = Vec::new();
        violations.extend(validation::require("nombre", &self.name));
        if let Some(missing) = validation::require("email", &self.email) {
            violations.push(missing);
        } else {
            violations.extend(validation::email_format("email", &self.email));
        }
        if let Some(missing) = validation::require("telefono", &self.phone) {
            violations.push(missing);
        } else {
            violations.extend(validation::phone_format("telefono", &self.phone));
        }
        violations.extend(validation::require("direccion", &self.address));
        validation::into_result("customer", violations)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    fn customer() -> Customer {
        Customer {
            id: 7,
            name: "Rosa Quispe".to_owned(),
            email: "rosa@example.com".to_owned(),
            phone: "987654321".to_owned(),
            address: "Av. Central 120".to_owned(),
            image_url: None,
        }
    }

    #[rstest]
    fn complete_customers_pass_validation() {
        customer().validate().expect("a complete customer is valid");
    }

    #[rstest]
    #[case("9876543210")]
    #[case("98-76")]
    fn long_or_non_numeric_phones_are_rejected(#[case] phone: &str) {
        let mut subject = customer();
        subject.phone = phone.to_owned();
        let err = subject.validate().expect_err("invalid phone");
        assert!(err.details().and_then(|d| d.get("telefono")).is_some());
    }

    #[rstest]
    fn blank_email_reports_required_not_format() {
        let mut subject = customer();
        subject.email = String::new();
        let err = subject.validate().expect_err("missing email");
        let details = err.details().expect("field details");
        assert_eq!(details["email"], "is required");
    }
}
