//! The console shell: command dispatch, auth and role gating, notices.
//!
//! The dispatcher is the console's route table: every screen except
//! sign-in/out requires an authenticated session, the user-administration
//! and report screens
//! additionally require the administrator claim (advisory; the backend
//! re-checks), and any 401 clears the persisted session before the operator
//! is pointed back at `console login`.

pub mod cli;
pub mod context;
pub mod notify;
pub mod render;
pub mod screens;
pub mod settings;

use std::ffi::OsString;
use std::process::ExitCode;

use mockable::Clock;
use ortho_config::OrthoConfig;

use self::cli::{
    CatalogsCommand, Cli, Command, CustomersCommand, OrdersCommand, ProductsCommand,
    ReportsCommand, UsersCommand,
};
use self::context::AppContext;
use self::notify::TerminalNotifier;
use self::settings::ConsoleSettings;
use crate::domain::ports::{Notice, Notifier};
use crate::domain::session::AuthState;
use crate::domain::{DomainError, ErrorCode};

/// Run one console invocation end to end.
pub async fn run(cli: Cli) -> ExitCode {
    let bootstrap_notifier = TerminalNotifier;
    let settings = match load_settings(&cli) {
        Ok(settings) => settings,
        Err(err) => {
            bootstrap_notifier.notify(Notice::error(err.to_string()));
            return ExitCode::FAILURE;
        }
    };
    let ctx = match AppContext::from_settings(&settings) {
        Ok(ctx) => ctx,
        Err(err) => {
            bootstrap_notifier.notify(Notice::error(err.to_string()));
            return ExitCode::FAILURE;
        }
    };

    match execute(&ctx, cli.command, cli.yes).await {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            handle_error(&ctx, &err);
            ExitCode::FAILURE
        }
    }
}

/// Layered settings (environment and config file via OrthoConfig) with the
/// global CLI flags taking precedence.
fn load_settings(cli: &Cli) -> Result<ConsoleSettings, DomainError> {
    let mut settings = ConsoleSettings::load_from_iter([OsString::from("console")])
        .map_err(|err| DomainError::internal(format!("configuration failed to load: {err}")))?;
    if cli.base_url.is_some() {
        settings.base_url.clone_from(&cli.base_url);
    }
    if cli.session_dir.is_some() {
        settings.session_dir.clone_from(&cli.session_dir);
    }
    if cli.timeout_secs.is_some() {
        settings.timeout_secs = cli.timeout_secs;
    }
    Ok(settings)
}

fn requires_auth(command: &Command) -> bool {
    !matches!(
        command,
        Command::Login { .. } | Command::Logout | Command::Whoami
    )
}

fn requires_admin(command: &Command) -> bool {
    matches!(command, Command::Users(_) | Command::Reports(_))
}

async fn execute(
    ctx: &AppContext,
    command: Command,
    assume_yes: bool,
) -> Result<String, DomainError> {
    if requires_auth(&command) {
        match ctx.sessions.current() {
            AuthState::Authenticated(_) => {}
            AuthState::Anonymous => {
                return Err(DomainError::unauthorized(
                    "sign in first with `console login`",
                ));
            }
            AuthState::Expired => {
                return Err(DomainError::unauthorized(
                    "your session has expired; sign in again",
                ));
            }
            AuthState::Invalid { reason } => {
                return Err(DomainError::unauthorized(format!(
                    "the stored session is unusable ({reason}); sign in again"
                )));
            }
        }
        if requires_admin(&command) && !ctx.sessions.is_administrator() {
            return Err(DomainError::forbidden(
                "this screen is reserved for administrators",
            ));
        }
    }

    match command {
        Command::Login { email, clave } => screens::session::login(ctx, &email, clave).await,
        Command::Logout => screens::session::logout(ctx),
        Command::Whoami => screens::session::whoami(ctx),
        Command::Products(command) => match command {
            ProductsCommand::List => screens::products::list(ctx).await,
            ProductsCommand::Show { id } => screens::products::show(ctx, id).await,
            ProductsCommand::Add(fields) => screens::products::add(ctx, fields).await,
            ProductsCommand::Edit { id, fields } => screens::products::edit(ctx, id, fields).await,
            ProductsCommand::Rm { id } => screens::products::remove(ctx, id, assume_yes).await,
        },
        Command::Customers(command) => match command {
            CustomersCommand::List => screens::customers::list(ctx).await,
            CustomersCommand::Show { id } => screens::customers::show(ctx, id).await,
            CustomersCommand::Add(fields) => screens::customers::add(ctx, fields).await,
            CustomersCommand::Edit { id, fields } => {
                screens::customers::edit(ctx, id, fields).await
            }
            CustomersCommand::Rm { id } => screens::customers::remove(ctx, id, assume_yes).await,
        },
        Command::Catalogs(command) => match command {
            CatalogsCommand::List => screens::catalogs::list(ctx).await,
            CatalogsCommand::Add {
                name,
                description,
                url,
            } => screens::catalogs::add(ctx, name, description, url).await,
            CatalogsCommand::Edit {
                id,
                name,
                description,
                url,
            } => screens::catalogs::edit(ctx, id, name, description, url).await,
            CatalogsCommand::Rm { id } => screens::catalogs::remove(ctx, id, assume_yes).await,
        },
        Command::Orders(command) => match command {
            OrdersCommand::List => screens::orders::list(ctx).await,
            OrdersCommand::Show { id } => screens::orders::show(ctx, id).await,
            OrdersCommand::Add {
                customer,
                lines,
                notes,
            } => screens::orders::add(ctx, customer, &lines, notes).await,
            OrdersCommand::Edit { id, lines, notes } => {
                screens::orders::edit(ctx, id, &lines, notes).await
            }
            OrdersCommand::Status { id, completed } => {
                screens::orders::status(ctx, id, completed).await
            }
            OrdersCommand::Rm { id } => screens::orders::remove(ctx, id, assume_yes).await,
        },
        Command::Users(command) => match command {
            UsersCommand::List => screens::accounts::list(ctx).await,
            UsersCommand::Add {
                username,
                email,
                clave,
                admin,
            } => screens::accounts::add(ctx, username, email, clave, admin).await,
            UsersCommand::Edit {
                id,
                username,
                email,
                clave,
                admin,
                active,
            } => screens::accounts::edit(ctx, id, username, email, clave, admin, active).await,
            UsersCommand::Rm { id } => screens::accounts::remove(ctx, id, assume_yes).await,
            UsersCommand::Enable { id } => screens::accounts::enable(ctx, id).await,
            UsersCommand::Disable { id } => screens::accounts::disable(ctx, id).await,
        },
        Command::Reports(command) => match command {
            ReportsCommand::Sales { from, to } => {
                let now = ctx.clock.utc();
                screens::reports::sales(ctx, from, to, now).await
            }
        },
    }
}

/// Convert a failure into a transient notice. A 401 additionally clears the
/// persisted session so the next command lands on the sign-in message.
fn handle_error(ctx: &AppContext, err: &DomainError) {
    if err.code() == ErrorCode::Unauthorized {
        ctx.sessions.invalidate();
    }
    let mut message = err.message().to_owned();
    if let Some(fields) = err.details().and_then(|details| details.as_object()) {
        for (field, finding) in fields {
            message.push_str(&format!("\n  {field}: {}", finding.as_str().unwrap_or("?")));
        }
    }
    ctx.notifier.notify(Notice::error(message));
}
