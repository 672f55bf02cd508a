// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tether - attach management tools to a running job

mod commands;
mod logging;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use commands::attach;
use tether_core::ToolConfig;

#[derive(Parser)]
#[command(
    name = "tether",
    version,
    about = "Attach a management tool to a running job"
)]
struct Cli {
    /// Config file (defaults to $TETHER_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Attach, print this tool's identity, then detach
    Attach(attach::AttachArgs),
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let _log_guard = logging::setup_logging(cli.verbose, cli.log_file.as_deref())?;

    let config = ToolConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Attach(args) => attach::attach(args, config),
    }
}
