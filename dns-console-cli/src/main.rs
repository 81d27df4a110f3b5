//! DNS console terminal frontend.
//!
//! Wires the HTTP API client into the core services and exposes the record
//! and domain intents as subcommands. Logs go to stderr; command output and
//! success notices go to stdout.

mod cli;
mod commands;
mod config;
mod console;

use std::process::ExitCode;

use clap::Parser;
use dns_console_core::CoreError;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;
use crate::commands::App;
use crate::config::CliConfig;

/// Exit status when the server rejected the session.
const EXIT_SESSION_EXPIRED: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match CliConfig::load(cli.config.as_deref()) {
        Ok(config) => config.with_env_overrides(|name| std::env::var(name).ok()),
        Err(e) => {
            eprintln!("error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(config.log_filter());
    tracing::debug!("Using API at {} ({:?})", config.api.base_url, config.api);

    let app = match App::new(&config) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    match app.run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if e
                .downcast_ref::<CoreError>()
                .is_some_and(CoreError::is_session_expired)
            {
                // The session listener has already printed the sign-in hint.
                return ExitCode::from(EXIT_SESSION_EXPIRED);
            }
            if !app.notifier().failure_reported() {
                eprintln!("error: {e:#}");
            }
            ExitCode::FAILURE
        }
    }
}

/// Installs the stderr subscriber. `RUST_LOG` wins over `default_filter`.
fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::try_new(default_filter).unwrap_or_else(|e| {
            eprintln!("warning: ignoring log filter {default_filter:?}: {e}");
            EnvFilter::new("info")
        })
    });

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_ansi(false),
        )
        .with(filter)
        .init();
}
