// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! shmregion CLI
//!
//! Command-line interface for creating, reading, writing and smoke-testing
//! named shared memory regions.

use clap::{Args, Parser, Subcommand};

use shmregion_core::{config, ConfigLoader};

mod commands;

use commands::ValueKind;

/// shmregion - named shared memory regions for inter-process communication
#[derive(Parser)]
#[command(name = "shmregion")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Which region to attach to.
#[derive(Args)]
pub struct RegionArgs {
    /// Region name
    #[arg(short, long)]
    pub name: String,

    /// Region capacity in bytes
    #[arg(long, default_value_t = 4096)]
    pub capacity: usize,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new region
    Create {
        #[command(flatten)]
        region: RegionArgs,

        /// Keep the region alive until Ctrl-C
        #[arg(long)]
        hold: bool,
    },

    /// Connect to a region and write one value
    Write {
        #[command(flatten)]
        region: RegionArgs,

        /// Value type
        #[arg(short, long, value_enum)]
        kind: ValueKind,

        /// Value to write
        #[arg(long)]
        value: String,

        /// Byte offset
        #[arg(short, long, default_value_t = 0)]
        offset: usize,
    },

    /// Connect to a region and print one value
    Read {
        #[command(flatten)]
        region: RegionArgs,

        /// Value type
        #[arg(short, long, value_enum)]
        kind: ValueKind,

        /// Text length in code units (defaults to the rest of the region)
        #[arg(short, long)]
        len: Option<usize>,

        /// Byte offset
        #[arg(short, long, default_value_t = 0)]
        offset: usize,
    },

    /// Show information about a region
    Info {
        #[command(flatten)]
        region: RegionArgs,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print an int32 every time it changes, until Ctrl-C
    Watch {
        #[command(flatten)]
        region: RegionArgs,

        /// Byte offset
        #[arg(short, long, default_value_t = 0)]
        offset: usize,

        /// Poll interval in milliseconds
        #[arg(long, default_value_t = 200)]
        interval_ms: u64,
    },

    /// Run the built-in smoke test
    Smoke,

    /// Validate a configuration file
    Validate {
        /// Path to the configuration file
        file: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for command output
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = &cli.config {
        let loaded = ConfigLoader::load_file(path)?;
        config::install_global(loaded.shm)?;
        tracing::debug!(config = %path, "Loaded region configuration");
    }

    // Dispatch to command handlers
    match cli.command {
        Commands::Create { region, hold } => commands::create::execute(&region, hold).await,
        Commands::Write {
            region,
            kind,
            value,
            offset,
        } => commands::write::execute(&region, kind, &value, offset).await,
        Commands::Read {
            region,
            kind,
            len,
            offset,
        } => commands::read::execute(&region, kind, len, offset).await,
        Commands::Info { region, json } => commands::info::execute(&region, json).await,
        Commands::Watch {
            region,
            offset,
            interval_ms,
        } => commands::watch::execute(&region, offset, interval_ms).await,
        Commands::Smoke => commands::smoke::execute().await,
        Commands::Validate { file } => commands::validate::execute(&file).await,
    }
}
