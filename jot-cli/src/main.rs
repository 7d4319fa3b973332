mod cli;
mod cli_modes;
mod render;

use anyhow::Result;
use cli::{Cli, Command};
use cli_modes::{add_mode, classify_mode, history_mode};
use jot_core::{Config, JournalError, Jot};
use render::{RenderOptions, Renderer};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::new();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("jot: {e:#}");
            exit_code(&e)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load()?;
    if let Some(file) = cli.file {
        config.journal_file = file;
    }
    debug!(journal = %config.journal_file.display(), command = ?cli.command, "starting");
    let jot = Jot::with_config(config)?;
    let renderer = Renderer::new(RenderOptions {
        use_color: cli.color.enabled(),
    });

    match cli.command {
        Command::Add {
            timestamp,
            json,
            text,
        } => add_mode(&jot, &renderer, &text, timestamp.as_deref(), json),
        Command::History {
            limit,
            category,
            json,
        } => history_mode(&jot, &renderer, limit, category, json),
        Command::Classify { json, text } => classify_mode(&jot, &renderer, &text, json),
        Command::Path => {
            println!("{}", jot.store.path().display());
            Ok(())
        }
    }
}

/// 2 for bad input, 3 for an unusable journal file, 1 for anything else.
fn exit_code(e: &anyhow::Error) -> ExitCode {
    match e.downcast_ref::<JournalError>() {
        Some(JournalError::Validation(_)) => ExitCode::from(2),
        Some(JournalError::Storage(_)) => ExitCode::from(3),
        _ => ExitCode::FAILURE,
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("JOT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
