//! Report command: build one workbook from local files

use super::CommandOutcome;
use super::shared::{load_configuration, setup_logging};
use crate::app::adapters::filesystem::write_report;
use crate::app::services::report_builder::{RenderedReport, render_report};
use crate::cli::args::ReportArgs;
use crate::constants::MSG_NO_RECORDS;
use crate::{Error, Result};
use colored::*;
use std::time::Instant;
use tokio::task;
use tracing::info;

pub async fn run(args: ReportArgs) -> Result<CommandOutcome> {
    let start_time = Instant::now();
    setup_logging(&args.common, 0)?;

    args.validate()?;
    let config = load_configuration(&args.common)?;
    let filters = args.filters()?;
    let sources = args.source_paths().read().await?;

    let report_config = config.report.clone();
    let rendered = task::spawn_blocking(move || render_report(&sources, &filters, &report_config))
        .await
        .map_err(|e| Error::processing_interrupted(format!("report task failed: {}", e)))??;

    match rendered {
        RenderedReport::Workbook {
            filename,
            bytes,
            rows,
            months,
        } => {
            let path = write_report(&args.output_dir, &filename, &bytes).await?;
            info!("Wrote {} ({} bytes)", path.display(), bytes.len());

            if !args.common.quiet {
                println!("{}", "Report written".bright_green().bold());
                println!("  {} {}", "File:".bright_cyan(), path.display());
                println!(
                    "  {} {}",
                    "Accounts:".bright_cyan(),
                    rows.to_string().bright_white().bold()
                );
                println!(
                    "  {} {}",
                    "Months:".bright_cyan(),
                    months.to_string().bright_white().bold()
                );
                println!(
                    "  {} {}ms",
                    "Time elapsed:".bright_cyan(),
                    start_time.elapsed().as_millis().to_string().bright_white()
                );
            }

            Ok(CommandOutcome::ReportWritten { path, rows, months })
        }
        RenderedReport::NoMatchingRecords(reason) => {
            info!("No report written: {:?}", reason);
            if !args.common.quiet {
                println!("{}", MSG_NO_RECORDS.bright_yellow());
            }
            Ok(CommandOutcome::NoMatchingRecords)
        }
    }
}
