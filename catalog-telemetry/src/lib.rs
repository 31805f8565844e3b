//! Structured logging for prompt catalog binaries.
//!
//! Libraries in the workspace only emit `tracing` events. Binaries call
//! [`init_tracing`] once at startup to print them.

#![warn(missing_docs, clippy::pedantic)]

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Environment variable consulted for filter directives.
pub const FILTER_ENV_VAR: &str = "RUST_LOG";

/// Errors raised while installing the subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The fallback directive could not be parsed.
    #[error("invalid log directive `{directive}`: {reason}")]
    InvalidDirective {
        /// Directive as given.
        directive: String,
        /// Parser message.
        reason: String,
    },
    /// A global subscriber was already set.
    #[error("a global tracing subscriber is already installed")]
    AlreadyInstalled,
}

/// Result alias for telemetry setup.
pub type TelemetryResult<T> = Result<T, TelemetryError>;

/// Builds the filter from `RUST_LOG`, or from `default_directive` when the
/// variable is unset or unparsable.
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidDirective`] if the fallback is malformed.
pub fn env_filter(default_directive: &str) -> TelemetryResult<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_env(FILTER_ENV_VAR) {
        return Ok(filter);
    }
    EnvFilter::try_new(default_directive).map_err(|err| TelemetryError::InvalidDirective {
        directive: default_directive.to_owned(),
        reason: err.to_string(),
    })
}

/// Installs a formatted subscriber writing to stderr.
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidDirective`] for a bad fallback directive
/// and [`TelemetryError::AlreadyInstalled`] when called twice.
pub fn init_tracing(default_directive: &str) -> TelemetryResult<()> {
    let filter = env_filter(default_directive)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|_| TelemetryError::AlreadyInstalled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_fallback() {
        if std::env::var_os(FILTER_ENV_VAR).is_some() {
            return;
        }
        let err = env_filter("catalog=loudest").unwrap_err();
        assert!(matches!(err, TelemetryError::InvalidDirective { .. }));
    }

    #[test]
    fn second_install_fails() {
        let first = init_tracing("warn");
        let second = init_tracing("warn");
        assert!(first.is_ok() || matches!(first, Err(TelemetryError::AlreadyInstalled)));
        assert!(matches!(second, Err(TelemetryError::AlreadyInstalled)));
    }
}
