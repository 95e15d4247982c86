//! Driving port for the sign-in exchange.

use async_trait::async_trait;

use crate::domain::{DomainError, LoginCredentials};

/// What a successful sign-in returns: the bearer token and the display name
/// the backend knows the operator by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginGrant {
    /// Bearer token (`jwt`).
    pub token: String,
    /// Display name (`username`).
    pub username: String,
}

/// Domain use-case port for authentication.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchange credentials for a grant. Rejected credentials surface as an
    /// `Unauthorized` error carrying the backend's message.
    async fn sign_in(&self, credentials: &LoginCredentials) -> Result<LoginGrant, DomainError>;
}
