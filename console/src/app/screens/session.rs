//! Sign-in, sign-out, and session inspection screens.

use crate::app::context::AppContext;
use crate::domain::ports::{Notice, Notifier};
use crate::domain::session::AuthState;
use crate::domain::{DomainError, LoginCredentials};

/// `console login`.
pub async fn login(
    ctx: &AppContext,
    email: &str,
    clave: Option<String>,
) -> Result<String, DomainError> {
    let clave = super::resolve_clave(clave)?;
    let credentials = LoginCredentials::try_from_parts(email, &clave)
        .map_err(|err| DomainError::invalid_request(err.to_string()))?;
    let session = ctx.sessions.login(&credentials).await?;

    let mut output = format!(
        "Signed in as {} ({})\n",
        session.username(),
        session.role()
    );
    if let Some(remaining) = ctx.sessions.time_remaining() {
        output.push_str(&format!(
            "Session expires in {} minute(s)\n",
            remaining.num_minutes().max(0)
        ));
    }
    Ok(output)
}

/// `console logout`.
pub fn logout(ctx: &AppContext) -> Result<String, DomainError> {
    ctx.sessions.logout()?;
    Ok("Signed out\n".to_owned())
}

/// `console whoami`.
pub fn whoami(ctx: &AppContext) -> Result<String, DomainError> {
    match ctx.sessions.current() {
        AuthState::Authenticated(session) => {
            let mut output = format!(
                "{} <{}> role {}\n",
                session.username(),
                session.email(),
                session.role()
            );
            if let Some(remaining) = ctx.sessions.time_remaining() {
                output.push_str(&format!(
                    "Session expires in {} minute(s)\n",
                    remaining.num_minutes().max(0)
                ));
            }
            Ok(output)
        }
        AuthState::Anonymous => Ok("Not signed in\n".to_owned()),
        AuthState::Expired => {
            ctx.notifier.notify(Notice::warning(
                "Your session has expired. Please sign in again.",
            ));
            Ok("Not signed in (session expired)\n".to_owned())
        }
        AuthState::Invalid { reason } => {
            ctx.notifier.notify(Notice::warning(format!(
                "Stored session is unusable ({reason}). Please sign in again."
            )));
            Ok("Not signed in (stored session unusable)\n".to_owned())
        }
    }
}
