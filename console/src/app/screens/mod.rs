//! Screens: one module per section of the console.
//!
//! Each screen fetches what it needs, runs the domain checks, talks to the
//! gateways, and returns the text to print. Errors bubble up to the
//! dispatcher, which turns them into transient notices.

pub mod accounts;
pub mod catalogs;
pub mod customers;
pub mod orders;
pub mod products;
pub mod reports;
pub mod session;

use std::io::{self, BufRead, Write};

use crate::domain::DomainError;

/// Ask the operator to confirm a destructive action. `assume_yes` (the
/// `--yes` flag) skips the prompt.
pub fn confirm(prompt: &str, assume_yes: bool) -> Result<bool, DomainError> {
    if assume_yes {
        return Ok(true);
    }
    eprint!("{prompt} [y/N] ");
    io::stderr()
        .flush()
        .map_err(|err| DomainError::internal(format!("prompt failed: {err}")))?;
    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .map_err(|err| DomainError::internal(format!("prompt failed: {err}")))?;
    let answer = answer.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}

/// Resolve a credential from its flag or the CONSOLE_CLAVE environment
/// variable; never echoed anywhere.
pub fn resolve_clave(flag: Option<String>) -> Result<String, DomainError> {
    flag.or_else(|| std::env::var("CONSOLE_CLAVE").ok())
        .filter(|clave| !clave.is_empty())
        .ok_or_else(|| {
            DomainError::invalid_request("provide --clave or set the CONSOLE_CLAVE variable")
        })
}
