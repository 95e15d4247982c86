//! Operator roles as carried in token claims and user records.

use std::fmt;

/// Wire value of the administrator role claim.
pub const ADMIN_CLAIM: &str = "ROLE_ADMIN";
/// Wire value of the standard-operator role claim.
pub const USER_CLAIM: &str = "ROLE_USER";

/// The two roles the backend issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    /// Standard operator.
    #[default]
    User,
    /// Administrator; unlocks user management and reports.
    Admin,
}

impl Role {
    /// Map a raw claim value onto a role.
    ///
    /// Anything other than the exact administrator claim degrades to the
    /// standard role; unknown claims never grant privileges.
    pub fn from_claim(claim: &str) -> Self {
        if claim == ADMIN_CLAIM {
            Self::Admin
        } else {
            Self::User
        }
    }

    /// The wire claim value for this role.
    pub fn as_claim(self) -> &'static str {
        match self {
            Self::User => USER_CLAIM,
            Self::Admin => ADMIN_CLAIM,
        }
    }

    /// Whether this role unlocks the administrator-only screens.
    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_claim())
    }
}
