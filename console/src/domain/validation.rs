//! Shared field-level validation helpers for the entity forms.
//!
//! Each entity exposes its own `validate` routine built from these helpers,
//! mirroring the per-form checks of the console screens: required fields,
//! format regexes, and numeric bounds. Violations carry the wire field name
//! so a notice can point the operator at the offending input.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::domain::DomainError;

/// One failed field check, keyed by the field's wire name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    field: &'static str,
    message: String,
}

impl FieldViolation {
    /// Record a violation against `field`.
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    /// Wire name of the offending field.
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Operator-facing description of the failed check.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static PHONE_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

fn phone_regex() -> &'static Regex {
    PHONE_RE.get_or_init(|| {
        // Digits only, at most nine of them.
        let pattern = r"^[0-9]{1,9}$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("phone regex failed to compile: {error}"))
    })
}

/// Require a non-blank value.
pub fn require(field: &'static str, value: &str) -> Option<FieldViolation> {
    if value.trim().is_empty() {
        Some(FieldViolation::new(field, "is required"))
    } else {
        None
    }
}

/// Require an email-shaped value.
pub fn email_format(field: &'static str, value: &str) -> Option<FieldViolation> {
    if email_regex().is_match(value) {
        None
    } else {
        Some(FieldViolation::new(field, "must be a valid email address"))
    }
}

/// Require a phone number of at most nine digits.
pub fn phone_format(field: &'static str, value: &str) -> Option<FieldViolation> {
    if phone_regex().is_match(value) {
        None
    } else {
        Some(FieldViolation::new(
            field,
            "must contain only digits (at most 9)",
        ))
    }
}

/// Require a non-negative amount.
pub fn non_negative(field: &'static str, value: f64) -> Option<FieldViolation> {
    if value < 0.0 {
        Some(FieldViolation::new(field, "must be zero or greater"))
    } else {
        None
    }
}

/// Require a reference to have been chosen (a non-zero identifier).
pub fn chosen(field: &'static str, id: u64) -> Option<FieldViolation> {
    if id == 0 {
        Some(FieldViolation::new(field, "must be selected"))
    } else {
        None
    }
}

/// Collapse a list of violations into a single [`DomainError`] whose details
/// map field names to messages. Returns `Ok(())` when the list is empty.
pub fn into_result(entity: &str, violations: Vec<FieldViolation>) -> Result<(), DomainError> {
    if violations.is_empty() {
        return Ok(());
    }
    let mut fields = Map::new();
    for violation in &violations {
        fields.insert(
            violation.field().to_owned(),
            Value::String(violation.message().to_owned()),
        );
    }
    Err(
        DomainError::invalid_request(format!("{entity} has invalid fields"))
            .with_details(Value::Object(fields)),
    )
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("a@b.com", true)]
    #[case("first.last@example.co", true)]
    #[case("no-at-sign", false)]
    #[case("two@@signs.com", false)]
    #[case("spaces in@mail.com", false)]
    #[case("missing@tld", false)]
    fn email_checks(#[case] value: &str, #[case] valid: bool) {
        assert_eq!(email_format("email", value).is_none(), valid);
    }

    #[rstest]
    #[case("987654321", true)]
    #[case("1", true)]
    #[case("9876543210", false)]
    #[case("12a45", false)]
    #[case("", false)]
    fn phone_checks(#[case] value: &str, #[case] valid: bool) {
        assert_eq!(phone_format("telefono", value).is_none(), valid);
    }

    #[rstest]
    fn required_rejects_blank_values() {
        assert!(require("nombre", "  ").is_some());
        assert!(require("nombre", "Laptop").is_none());
    }

    #[rstest]
    fn amounts_must_not_be_negative() {
        assert!(non_negative("precio", -0.01).is_some());
        assert!(non_negative("precio", 0.0).is_none());
    }

    #[rstest]
    fn violations_collapse_into_field_details() {
        let violations = vec![
            FieldViolation::new("email", "is required"),
            FieldViolation::new("telefono", "must contain only digits (at most 9)"),
        ];
        let err = into_result("customer", violations).expect_err("violations must fail");
        let details = err.details().expect("details are attached");
        assert_eq!(details["email"], "is required");
        assert!(into_result("customer", Vec::new()).is_ok());
    }
}
