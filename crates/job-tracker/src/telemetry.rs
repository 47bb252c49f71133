use crate::config::TelemetryConfig;
use tracing_subscriber::filter::{Directive, ParseError};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("invalid log level/filter '{value}': unable to build EnvFilter")]
    EnvFilter { value: String, source: ParseError },
    #[error("telemetry error: {0}")]
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

/// `RUST_LOG` wins over the configured level; `verbose` forces debug output for this crate.
fn env_filter(config: &TelemetryConfig, verbose: bool) -> Result<EnvFilter, TelemetryError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            EnvFilter::try_new(&config.log_level).map_err(|source| TelemetryError::EnvFilter {
                value: config.log_level.clone(),
                source,
            })?
        }
    };

    if !verbose {
        return Ok(filter);
    }

    const VERBOSE_DIRECTIVE: &str = "job_tracker=debug";
    let directive = VERBOSE_DIRECTIVE
        .parse::<Directive>()
        .map_err(|source| TelemetryError::EnvFilter {
            value: VERBOSE_DIRECTIVE.to_string(),
            source,
        })?;
    Ok(filter.add_directive(directive))
}

/// Install the process-wide subscriber. Logs go to stderr so stdout stays clean for JSON
/// reports.
pub fn init(config: &TelemetryConfig, verbose: bool) -> Result<(), TelemetryError> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config, verbose)?)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Subscriber)
}
