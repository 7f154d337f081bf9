//! Command implementations for the balance report CLI
//!
//! This module dispatches subcommands and owns the outcome type reported
//! back to `main`.

pub mod report;
pub mod serve;
pub mod shared;

use crate::{Error, Result};
use crate::cli::args::{Args, Commands};
use std::path::PathBuf;

/// What a finished command produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The server shut down cleanly
    ServerStopped,
    /// A workbook was written
    ReportWritten { path: PathBuf, rows: usize, months: usize },
    /// The filters matched no balance rows
    NoMatchingRecords,
}

/// Run the selected subcommand
pub async fn run(args: Args) -> Result<CommandOutcome> {
    match args.command {
        Some(Commands::Serve(serve_args)) => serve::run(serve_args).await,
        Some(Commands::Report(report_args)) => report::run(report_args).await,
        None => Err(Error::configuration("no subcommand given")),
    }
}
