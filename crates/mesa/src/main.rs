// SPDX-FileCopyrightText: 2026 Mesa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mesa - restaurant FAQ assistant with table reservations.
//!
//! This is the binary entry point.

mod check;
mod shell;
mod slot;
mod wiring;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;

/// Mesa - restaurant FAQ assistant with table reservations.
#[derive(Parser, Debug)]
#[command(name = "mesa", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Chat with the assistant (default).
    Shell,
    /// Validate configuration and load the FAQ artifacts.
    Check,
    /// Show table occupancy for one slot.
    Slot {
        /// Date as YYYY-MM-DD.
        #[arg(value_parser = slot::parse_date)]
        date: String,
        /// Time as HH:MM.
        #[arg(value_parser = slot::parse_time)]
        time: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match cli.config.as_deref() {
        Some(path) => mesa_config::load_and_validate_path(path),
        None => mesa_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            mesa_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.assistant.log_level);

    let result = match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => shell::run_shell(config).await,
        Commands::Check => check::run_check(&config).await,
        Commands::Slot { date, time } => slot::run_slot(&config, &date, &time).await,
    };

    if let Err(e) = result {
        eprintln!("{}: {e}", "error".red());
        std::process::exit(1);
    }
}

/// Logs go to stderr so the conversation on stdout stays readable.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("mesa={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
