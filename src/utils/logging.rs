//! Structured logging setup backed by `tracing-subscriber`.

use tracing::info;

use crate::config::LoggingConfig;
use crate::error::{constants, ProtocolError, Result};

/// Install the global fmt subscriber described by `config`.
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_ansi(config.ansi)
        .with_target(false)
        .try_init()
        .map_err(|e| ProtocolError::ConfigError(format!("{}: {e}", constants::ERR_LOGGING_INIT)))?;

    info!(app = %config.app_name, level = %config.log_level, "Logging initialized");
    Ok(())
}
