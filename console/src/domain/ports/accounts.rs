//! Driving port for operator account administration.

use async_trait::async_trait;

use crate::domain::{AccountDraft, DomainError, UserAccount};

/// Thin surface over the user-administration resource. Administrator-only on
/// the backend; the shell additionally gates the screens client-side.
#[async_trait]
pub trait AccountsGateway: Send + Sync {
    /// Fetch every account (credentials are never part of the read model).
    async fn list(&self) -> Result<Vec<UserAccount>, DomainError>;
    /// Create an account and return the stored record.
    async fn create(&self, draft: &AccountDraft) -> Result<UserAccount, DomainError>;
    /// Replace an account and return the stored record.
    async fn update(&self, id: u64, draft: &AccountDraft) -> Result<UserAccount, DomainError>;
    /// Delete an account.
    async fn delete(&self, id: u64) -> Result<(), DomainError>;
    /// Allow the account to sign in again.
    async fn enable(&self, id: u64) -> Result<(), DomainError>;
    /// Bar the account from signing in.
    async fn disable(&self, id: u64) -> Result<(), DomainError>;
}
