//! The persisted operator session and its tagged authentication state.

use zeroize::Zeroizing;

use crate::domain::role::Role;

/// The identity persisted after a successful sign-in: the email and
/// credential the operator typed, the display name and bearer token the
/// backend returned, and the role recovered from the token's claims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    email: String,
    username: String,
    secret: Zeroizing<String>,
    token: String,
    role: Role,
}

impl Session {
    /// Assemble a session from its parts.
    pub fn new(
        email: impl Into<String>,
        username: impl Into<String>,
        secret: Zeroizing<String>,
        token: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            email: email.into(),
            username: username.into(),
            secret,
            token: token.into(),
            role,
        }
    }

    /// Sign-in email.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Display name returned by the backend (`usuario`).
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Persisted credential; never rendered, only re-serialized.
    pub fn secret(&self) -> &str {
        self.secret.as_str()
    }

    /// Bearer token attached to every authenticated request.
    pub fn token(&self) -> &str {
        self.token.as_str()
    }

    /// Role recovered from the token at sign-in. Advisory: gates screens
    /// only, the backend re-checks every write.
    pub fn role(&self) -> Role {
        self.role
    }
}

/// Tagged authentication state.
///
/// Decode or storage failures surface as [`AuthState::Invalid`] rather than
/// being collapsed into "anonymous": the effect is the same fail-closed
/// gating, but the cause stays visible to the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// A live session exists.
    Authenticated(Session),
    /// No session is persisted.
    Anonymous,
    /// The session's token expired and the session was cleared.
    Expired,
    /// A session is persisted but unusable.
    Invalid {
        /// Why the persisted session could not be trusted.
        reason: String,
    },
}
