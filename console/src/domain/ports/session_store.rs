//! Driven port for durable session storage.

use crate::domain::{DomainError, Session};

/// Durable storage for the single operator session (the analog of the
/// browser's fixed-key local storage).
///
/// `load` distinguishes "nothing stored" (`Ok(None)`) from "stored but
/// unreadable" (an error) so the session service can report the latter as an
/// invalid — not merely absent — session.
pub trait SessionStore: Send + Sync {
    /// Read the persisted session, if any.
    ///
    /// # Errors
    ///
    /// Returns an error when a session exists but cannot be read or parsed.
    fn load(&self) -> Result<Option<Session>, DomainError>;
    /// Persist the session, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error when the session cannot be written durably.
    fn save(&self, session: &Session) -> Result<(), DomainError>;
    /// Remove the persisted session; removing an absent session succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error when the stored session exists but cannot be removed.
    fn clear(&self) -> Result<(), DomainError>;
}
