//! Authentication primitives such as login credentials.
//!
//! Keep raw input parsing at the edge by exposing constructors that validate
//! string inputs before the shell talks to a gateway or service.

use std::fmt;

use zeroize::Zeroizing;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Credential was blank.
    EmptySecret,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptySecret => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials posted to the sign-in endpoint.
///
/// ## Invariants
/// - `email` is trimmed and must not be empty after trimming.
/// - `secret` must be non-empty but retains caller-provided whitespace to
///   avoid surprising credential comparisons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    secret: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    ///
    /// # Errors
    ///
    /// Returns a [`LoginValidationError`] when either part is blank.
    pub fn try_from_parts(email: &str, secret: &str) -> Result<Self, LoginValidationError> {
        let normalized = email.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }
        if secret.is_empty() {
            return Err(LoginValidationError::EmptySecret);
        }
        Ok(Self {
            email: normalized.to_owned(),
            secret: Zeroizing::new(secret.to_owned()),
        })
    }

    /// Email used for the sign-in lookup.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Credential provided by the operator.
    pub fn secret(&self) -> &str {
        self.secret.as_str()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyEmail)]
    #[case("   ", "pw", LoginValidationError::EmptyEmail)]
    #[case("a@b.com", "", LoginValidationError::EmptySecret)]
    fn invalid_credentials(
        #[case] email: &str,
        #[case] secret: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err =
            LoginCredentials::try_from_parts(email, secret).expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("  a@b.com  ", "secret")]
    #[case("alice@example.com", "correct horse battery staple")]
    fn valid_credentials_trim_email(#[case] email: &str, #[case] secret: &str) {
        let creds =
            LoginCredentials::try_from_parts(email, secret).expect("valid inputs should succeed");
        assert_eq!(creds.email(), email.trim());
        assert_eq!(creds.secret(), secret);
    }
}
