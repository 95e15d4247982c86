//! Console entry-point: parses the command surface and runs one screen.

use std::process::ExitCode;

use clap::Parser;
use console::app::{self, cli::Cli};
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> color_eyre::Result<ExitCode> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();
    let runtime = Builder::new_current_thread().enable_all().build()?;
    Ok(runtime.block_on(app::run(cli)))
}
