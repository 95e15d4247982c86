//! Session lifecycle: sign-in, durable persistence, expiry, role gating.
//!
//! An explicit service instance wired through the application context — not
//! a module-level singleton — owning the sign-in exchange, the persisted
//! session, and the expiry decision against an injected clock.

use std::sync::Arc;

use mockable::Clock;
use tracing::warn;
use zeroize::Zeroizing;

use crate::domain::ports::{AuthGateway, SessionStore};
use crate::domain::role::Role;
use crate::domain::session::{AuthState, Session};
use crate::domain::token;
use crate::domain::{DomainError, LoginCredentials};

/// Sign-in, sign-out, and session inspection for the console shell.
pub struct SessionService {
    auth: Arc<dyn AuthGateway>,
    store: Arc<dyn SessionStore>,
    clock: Arc<dyn Clock>,
}

impl SessionService {
    /// Wire the service from its collaborators.
    pub fn new(
        auth: Arc<dyn AuthGateway>,
        store: Arc<dyn SessionStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { auth, store, clock }
    }

    /// Exchange credentials for a grant, decode the token's role claim
    /// (advisory, unverified), persist the session, and return it.
    ///
    /// # Errors
    ///
    /// `Unauthorized` with the backend's message when the credentials are
    /// rejected; `Upstream` when the grant carries an undecodable token; any
    /// store error when persisting fails.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<Session, DomainError> {
        let grant = self.auth.sign_in(credentials).await?;
        let claims = token::decode_unverified(&grant.token).map_err(|err| {
            DomainError::upstream(format!("sign-in returned an undecodable token: {err}"))
        })?;
        let role = claims
            .role_claim
            .as_deref()
            .map(Role::from_claim)
            .unwrap_or_default();
        let session = Session::new(
            credentials.email(),
            grant.username,
            Zeroizing::new(credentials.secret().to_owned()),
            grant.token,
            role,
        );
        self.store.save(&session)?;
        Ok(session)
    }

    /// Remove the persisted session.
    ///
    /// # Errors
    ///
    /// Propagates the store error when the session cannot be removed.
    pub fn logout(&self) -> Result<(), DomainError> {
        self.store.clear()
    }

    /// Inspect the persisted session.
    ///
    /// A stored-but-unreadable session or an undecodable token reports as
    /// [`AuthState::Invalid`]; a token past its expiry clears the session and
    /// reports [`AuthState::Expired`] so the shell can show the sign-in
    /// notice. Both gate exactly like [`AuthState::Anonymous`].
    pub fn current(&self) -> AuthState {
        let stored = match self.store.load() {
            Ok(stored) => stored,
            Err(err) => {
                warn!(error = %err, "persisted session could not be read");
                return AuthState::Invalid {
                    reason: err.to_string(),
                };
            }
        };
        let Some(session) = stored else {
            return AuthState::Anonymous;
        };
        let claims = match token::decode_unverified(session.token()) {
            Ok(claims) => claims,
            Err(err) => {
                warn!(error = %err, "persisted session token is undecodable");
                return AuthState::Invalid {
                    reason: err.to_string(),
                };
            }
        };
        if let Some(expires_at) = claims.expires_at
            && expires_at <= self.clock.utc()
        {
            if let Err(err) = self.store.clear() {
                warn!(error = %err, "expired session could not be cleared");
            }
            return AuthState::Expired;
        }
        AuthState::Authenticated(session)
    }

    /// Whether the persisted session's token carries the administrator
    /// claim. Re-decodes the token on every call; any failure is `false`.
    pub fn is_administrator(&self) -> bool {
        match self.current() {
            AuthState::Authenticated(session) => token::decode_unverified(session.token())
                .ok()
                .and_then(|claims| claims.role_claim)
                .is_some_and(|claim| Role::from_claim(&claim).is_admin()),
            _ => false,
        }
    }

    /// Time until the current session's token expires, when both a session
    /// and an `exp` claim exist. May be negative if called between expiry
    /// and the next [`SessionService::current`] sweep.
    pub fn time_remaining(&self) -> Option<chrono::Duration> {
        let stored = self.store.load().ok().flatten()?;
        let claims = token::decode_unverified(stored.token()).ok()?;
        let expires_at = claims.expires_at?;
        Some(expires_at.signed_duration_since(self.clock.utc()))
    }

    /// React to a 401 from any gateway: drop the persisted session so the
    /// next command lands on the sign-in notice.
    pub fn invalidate(&self) {
        if let Err(err) = self.store.clear() {
            warn!(error = %err, "session could not be cleared after 401");
        }
    }
}
