//! Keyward command-line shell.
//!
//! Passwords are read from stdin only, never from argv. Stdout carries
//! records and digests; logs go to stderr.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

mod cli;
mod commands;

use std::io;
use std::process::ExitCode;

use clap::Parser;

use cli::{Cli, Command, PolicyAction};

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level(cli.verbose))),
        )
        .init();

    if let Err(e) = keyward_crypto_core::disable_core_dumps() {
        tracing::warn!("could not disable core dumps: {e}");
    }

    match run(&cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(commands::EXIT_ERROR)
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<u8> {
    let stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    let config_dir = cli.config_dir.as_path();

    match &cli.command {
        Command::Hash => commands::cmd_hash(config_dir, stdin, &mut stdout),
        Command::Verify { record } => commands::cmd_verify(config_dir, record, stdin, &mut stdout),
        Command::Digest { text } => commands::cmd_digest(text.as_deref(), stdin, &mut stdout),
        Command::Calibrate { target_ms, prf } => {
            commands::cmd_calibrate((*prf).into(), *target_ms, &mut stdout)
        }
        Command::Policy { action } => match action {
            PolicyAction::Show => commands::cmd_policy_show(config_dir, &mut stdout),
            PolicyAction::Init { force } => commands::cmd_policy_init(config_dir, *force),
        },
    }
}

const fn default_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}
