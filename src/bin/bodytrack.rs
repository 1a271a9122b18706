// ABOUTME: bodytrack CLI - records one day of body measurements for a subject
// ABOUTME: Parses flags, initializes logging and configuration, then runs an interactive session
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Record today's measurements in ./<username>.dat
//! bodytrack
//!
//! # Verbose diagnostics on stderr
//! bodytrack --logging DEBUG
//!
//! # Use an explicit record file
//! bodytrack -d ~/records/erin.dat
//! ```

use anyhow::Result;
use bodytrack::config::BodytrackConfig;
use bodytrack::errors::AppError;
use bodytrack::logging::{LogLevel, LoggingConfig};
use bodytrack::prompt::Prompter;
use bodytrack::session::{ask_username, run_session, SessionOutcome};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "bodytrack",
    version,
    about = "Body measurement log with body-fat, BMR, strength and recovery estimates",
    long_about = "Interactively records one day of body measurements, derives body-fat fraction, basal metabolic rate, one-rep maxima and heart-rate recovery, and saves them to the subject's CSV record."
)]
struct Cli {
    /// Logging level: DEBUG, INFO, WARNING, ERROR or CRITICAL
    #[arg(long, value_name = "LEVEL")]
    logging: Option<LogLevel>,

    /// Record file; defaults to <data dir>/<username>.dat
    #[arg(long = "database-file", short = 'd', value_name = "PATH")]
    database_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(failure) => {
            eprintln!("Error: {failure:#}");
            let code = failure
                .downcast_ref::<AppError>()
                .map_or(1, |app_error| app_error.code.exit_code());
            ExitCode::from(code)
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if let Some(level) = cli.logging {
        logging = logging.with_level(level);
    }
    logging.init()?;

    let config = BodytrackConfig::load().map_err(AppError::from)?;
    info!("Configuration loaded: {}", serde_json::to_string(&config)?);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut prompter = Prompter::new(stdin.lock(), stdout.lock());

    let username = ask_username(&mut prompter)?;
    let path = cli
        .database_file
        .unwrap_or_else(|| config.record_path(&username));
    info!(username = %username, path = %path.display(), "Starting session");

    match run_session(&mut prompter, &config, &path)? {
        SessionOutcome::Saved { date, upsert } => {
            info!(%date, ?upsert, path = %path.display(), "Entry recorded");
        }
        SessionOutcome::Abandoned => {
            info!(path = %path.display(), "No changes written");
        }
    }
    Ok(())
}
