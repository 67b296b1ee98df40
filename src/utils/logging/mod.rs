//! Logging initialisation
//!
//! Installs a `tracing-subscriber` formatter. `RUST_LOG` wins over the
//! configured level when set.

use crate::config::{LogFormat, LoggingConfig};
use crate::utils::error::{Result, RouterError};
use tracing_subscriber::EnvFilter;

/// Build the filter for the given config, honouring `RUST_LOG`
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.level).map_err(|e| {
            RouterError::Config(format!("Invalid log level '{}': {}", config.level, e))
        }),
    }
}

/// Install the global subscriber
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = env_filter(config)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false);

    let installed = match config.format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().with_current_span(true).try_init(),
    };

    installed.map_err(|e| RouterError::Internal(format!("Failed to install logger: {}", e)))
}
