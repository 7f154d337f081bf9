//! Serve command: run the upload server

use super::CommandOutcome;
use super::shared::{load_configuration, setup_logging};
use crate::Result;
use crate::app::adapters::http;
use crate::cli::args::ServeArgs;
use colored::*;

pub async fn run(args: ServeArgs) -> Result<CommandOutcome> {
    setup_logging(&args.common, 1)?;

    let mut config = load_configuration(&args.common)?;
    args.apply_overrides(&mut config);
    config.validate()?;

    if !args.common.quiet {
        println!(
            "{} http://{}:{}",
            "Serving balance reports on".bright_green().bold(),
            config.server.host,
            config.server.port
        );
    }

    http::serve(&config).await?;
    Ok(CommandOutcome::ServerStopped)
}
