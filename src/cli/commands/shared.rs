//! Shared utilities for command implementations

use crate::Result;
use crate::cli::args::CommonArgs;
use crate::config::Config;
use tracing::{debug, info};

/// Set up structured logging
///
/// `base_verbosity` is the level used without `-v`: 0 for warn, 1 for info.
/// `RUST_LOG` takes precedence over the flags.
pub fn setup_logging(args: &CommonArgs, base_verbosity: u8) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level(base_verbosity);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("balhist_report={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
            .ok();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .ok();
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration using the layered approach (defaults -> file) and validate it
///
/// Command-line overrides are applied by the caller before [`Config::validate`]
/// runs a second time.
pub fn load_configuration(args: &CommonArgs) -> Result<Config> {
    match &args.config_file {
        Some(path) => info!("Using config file: {}", path.display()),
        None => debug!("No config file given, trying the default location"),
    }

    let config = args.load_config()?;
    config.validate()?;
    debug!("Loaded configuration: {:?}", config);
    Ok(config)
}
