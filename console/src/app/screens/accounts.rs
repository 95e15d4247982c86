//! User-administration screens (administrators only; the backend re-checks).

use zeroize::Zeroizing;

use crate::app::context::AppContext;
use crate::app::render;
use crate::domain::ports::{AccountsGateway, Notice, Notifier};
use crate::domain::{AccountDraft, DomainError, Role, UserAccount};

/// `console users list`. Credentials are write-only and never appear here.
pub async fn list(ctx: &AppContext) -> Result<String, DomainError> {
    let accounts = ctx.accounts.list().await?;
    Ok(render_table(&accounts))
}

/// `console users add`.
pub async fn add(
    ctx: &AppContext,
    username: String,
    email: String,
    clave: Option<String>,
    admin: bool,
) -> Result<String, DomainError> {
    let clave = super::resolve_clave(clave)?;
    let draft = AccountDraft {
        username,
        email,
        secret: Zeroizing::new(clave),
        active: true,
        role: if admin { Role::Admin } else { Role::User },
    };
    draft.validate()?;
    let stored = ctx.accounts.create(&draft).await?;
    ctx.notifier
        .notify(Notice::info(format!("Account {} created", stored.id)));
    Ok(format!(
        "Created account {} ({})\n",
        stored.id, stored.username
    ))
}

/// `console users edit <id>`. The credential is write-only, so it must be
/// supplied again on every edit.
pub async fn edit(
    ctx: &AppContext,
    id: u64,
    username: String,
    email: String,
    clave: Option<String>,
    admin: bool,
    active: bool,
) -> Result<String, DomainError> {
    let clave = super::resolve_clave(clave)?;
    let draft = AccountDraft {
        username,
        email,
        secret: Zeroizing::new(clave),
        active,
        role: if admin { Role::Admin } else { Role::User },
    };
    draft.validate()?;
    let stored = ctx.accounts.update(id, &draft).await?;
    ctx.notifier
        .notify(Notice::info(format!("Account {} updated", stored.id)));
    Ok(format!(
        "Updated account {} ({})\n",
        stored.id, stored.username
    ))
}

/// `console users rm <id>`.
pub async fn remove(ctx: &AppContext, id: u64, assume_yes: bool) -> Result<String, DomainError> {
    if !super::confirm(&format!("Delete account {id}?"), assume_yes)? {
        return Ok("Nothing deleted\n".to_owned());
    }
    ctx.accounts.delete(id).await?;
    ctx.notifier
        .notify(Notice::info(format!("Account {id} deleted")));
    let remaining = ctx.accounts.list().await?;
    Ok(render_table(&remaining))
}

/// `console users enable <id>`.
pub async fn enable(ctx: &AppContext, id: u64) -> Result<String, DomainError> {
    ctx.accounts.enable(id).await?;
    Ok(format!("Account {id} enabled\n"))
}

/// `console users disable <id>`.
pub async fn disable(ctx: &AppContext, id: u64) -> Result<String, DomainError> {
    ctx.accounts.disable(id).await?;
    Ok(format!("Account {id} disabled\n"))
}

fn render_table(accounts: &[UserAccount]) -> String {
    let rows: Vec<Vec<String>> = accounts
        .iter()
        .map(|account| {
            vec![
                account.id.to_string(),
                account.username.clone(),
                account.email.clone(),
                render::flag(account.active),
                account.role.to_string(),
            ]
        })
        .collect();
    render::table(&["id", "username", "email", "active", "role"], &rows)
}
