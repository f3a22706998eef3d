use anyhow::Context;
use clap::Parser;
use musync::commands::sync;
use musync::config::Cli;
use musync::{Config, SyncError};
use std::process::ExitCode;

/// Missing or unreadable root, bad configuration
const EXIT_FATAL: u8 = 1;
/// Anything else that stopped the run, e.g. a closed terminal
const EXIT_UNEXPECTED: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(exit_code_for(&err))
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    // Convert CLI args to Config - this validates immediately
    let config = Config::try_from(cli).context("invalid configuration")?;
    musync::logging::init(config.verbose);

    if !config.json {
        println!("musync v{}", musync::VERSION);
        println!("  Library: \"{}\"", config.library.display());
        println!("  Mirror:  \"{}\"", config.mirror.display());
        println!("  Extensions: {}", config.extensions.join(", "));
        println!();
    }

    let outcome = sync::run(&config).context("sync aborted")?;
    tracing::info!(
        cycles = outcome.cycles,
        copied = outcome.copied_files,
        failed = outcome.failed_files,
        bytes = outcome.bytes_copied,
        synced = outcome.synced(),
        "run finished"
    );

    Ok(())
}

fn exit_code_for(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<SyncError>() {
        Some(e) if e.is_fatal() => EXIT_FATAL,
        _ => EXIT_UNEXPECTED,
    }
}
