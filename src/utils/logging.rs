//! Logging setup and configuration

use std::io::IsTerminal;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::utils::error::{ActionError, Result};

/// Setup tracing subscriber for the binary
///
/// `RUST_LOG` wins over `default_level`. Output goes to stderr so that
/// stdout stays reserved for command output. Colors only when stderr is a
/// terminal.
pub fn setup_logging(default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| ActionError::ConfigError(format!("Invalid log filter: {e}")))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal()),
        )
        .try_init()
        .map_err(|e| ActionError::ConfigError(format!("Logging already initialized: {e}")))?;

    Ok(())
}
