use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod domain;
mod gateway;
mod services;

use crate::cli::{Cli, Commands};
use crate::commands::{handle_account_commands, handle_scan_commands, run_shell};
use crate::gateway::HttpGateway;
use crate::services::config::{load_config, resolve_settings};
use crate::services::controller::{Controller, Outcome};
use crate::services::notify::ConsoleNotifier;
use crate::services::storage::{load_session, save_session};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging();

    let settings = resolve_settings(cli.gateway.as_deref(), load_config()?);
    let gateway = HttpGateway::new(&settings.gateway_url, settings.timeout)?;
    // `shell` prints no envelope, so its alerts always go to the console.
    let shell = matches!(cli.command, Commands::Shell);
    let notifier = ConsoleNotifier::new(cli.json && !shell);
    let mut ctl = Controller::new(gateway, notifier, load_session()?);
    tracing::debug!(
        gateway = ctl.gateway().base_url(),
        signed_in = ctl.session().is_signed_in(),
        "client ready"
    );

    let outcome = if shell {
        let stdin = std::io::stdin();
        run_shell(&mut ctl, stdin.lock(), &mut std::io::stdout())?;
        Outcome::Done
    } else if let Some(o) = handle_account_commands(&cli, &mut ctl)? {
        o
    } else if let Some(o) = handle_scan_commands(&cli, &mut ctl)? {
        o
    } else {
        anyhow::bail!("unhandled command: {:?}", cli.command)
    };

    save_session(ctl.session())?;

    Ok(if outcome.is_done() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
