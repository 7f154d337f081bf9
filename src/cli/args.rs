//! Command-line argument definitions for the balance report tool
//!
//! This module defines the CLI interface using the clap derive API.

use crate::app::adapters::filesystem::SourcePaths;
use crate::app::services::filter::ReportFilters;
use crate::config::Config;
use crate::{Error, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the balance report tool
///
/// Filters, joins and pivots balance-history exports into a month-by-account
/// xlsx report, either as an upload server or as a one-off command.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "balhist-report",
    version,
    about = "Pivot balance-history exports into a month-by-account xlsx report",
    long_about = "Reads a balance-history ledger, an account catalog, an entity roster and an \
                  optional price-index workbook, keeps the balances of one entity within a month \
                  range, joins them with the catalogs and writes one row per account with one \
                  column per month."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Serve the upload form and the /upload endpoint
    Serve(ServeArgs),
    /// Build one report from local files
    Report(ReportArgs),
}

/// Options shared by every subcommand
#[derive(Debug, Clone, ClapArgs)]
pub struct CommonArgs {
    /// JSON configuration file
    ///
    /// Defaults to <config dir>/balhist-report/config.json when that file exists.
    #[arg(long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only show errors
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

impl CommonArgs {
    /// Determine the log level from the verbosity flags, starting at `base`
    pub fn get_log_level(&self, base: u8) -> &'static str {
        if self.quiet {
            return "error";
        }
        match base.saturating_add(self.verbose) {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Load the layered configuration named by these arguments
    pub fn load_config(&self) -> Result<Config> {
        Config::load_layered(self.config_file.as_deref())
    }
}

/// Arguments for the serve command
#[derive(Debug, Clone, Parser)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short = 'p', long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Maximum request size in megabytes
    #[arg(long = "max-upload-mb", value_name = "MB")]
    pub max_upload_mb: Option<usize>,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl ServeArgs {
    /// Apply command-line overrides on top of the loaded configuration
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(max_upload_mb) = self.max_upload_mb {
            config.server.max_upload_mb = max_upload_mb;
        }
    }
}

/// Arguments for the report command
#[derive(Debug, Clone, Parser)]
pub struct ReportArgs {
    /// Balance-history ledger export
    #[arg(long, value_name = "FILE")]
    pub balhist: PathBuf,

    /// Account catalog export
    #[arg(long, value_name = "FILE")]
    pub cuentas: PathBuf,

    /// Entity roster export
    #[arg(long, value_name = "FILE")]
    pub nomina: PathBuf,

    /// Price-index workbook
    #[arg(long, value_name = "FILE")]
    pub indices: Option<PathBuf>,

    /// Entity number to report on
    #[arg(long, value_name = "N")]
    pub entidad: String,

    /// First month of the report (YYYY-MM)
    #[arg(long, value_name = "YYYY-MM")]
    pub desde: String,

    /// Last month of the report (YYYY-MM)
    #[arg(long, value_name = "YYYY-MM")]
    pub hasta: String,

    /// First month of the price index (YYYY-MM)
    #[arg(long = "indices-desde", value_name = "YYYY-MM", requires = "indices_hasta")]
    pub indices_desde: Option<String>,

    /// Last month of the price index (YYYY-MM)
    #[arg(long = "indices-hasta", value_name = "YYYY-MM", requires = "indices_desde")]
    pub indices_hasta: Option<String>,

    /// Directory for the generated workbook
    #[arg(short = 'o', long = "output", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl ReportArgs {
    /// Interpret the filter arguments
    pub fn filters(&self) -> Result<ReportFilters> {
        ReportFilters::from_raw(
            &self.entidad,
            &self.desde,
            &self.hasta,
            self.indices_desde.as_deref(),
            self.indices_hasta.as_deref(),
        )
    }

    pub fn source_paths(&self) -> SourcePaths {
        SourcePaths {
            balhist: self.balhist.clone(),
            cuentas: self.cuentas.clone(),
            nomina: self.nomina.clone(),
            indices: self.indices.clone(),
        }
    }

    /// Reject argument combinations clap cannot express
    pub fn validate(&self) -> Result<()> {
        if self.indices_desde.is_some() && self.indices.is_none() {
            return Err(Error::configuration(
                "--indices-desde/--indices-hasta require --indices",
            ));
        }
        Ok(())
    }
}
