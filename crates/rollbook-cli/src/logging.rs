//! Logging setup for the Rollbook CLI
//!
//! Structured logging via `tracing`, with the level derived from the
//! `--verbose`/`--quiet` flags and overridable through `RUST_LOG`.

use crate::error::{Error, Result};
use tracing_subscriber::EnvFilter;

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter
    pub level: String,
    /// Include file and line numbers
    pub source_location: bool,
    /// Include span close events
    pub span_events: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            source_location: false,
            span_events: false,
        }
    }
}

impl LoggingConfig {
    /// Create logging config from verbosity level
    pub fn from_verbosity(verbosity: u8) -> Self {
        let mut config = Self::default();
        match verbosity {
            0 => {
                config.level = "warn".to_string();
            }
            1 => {
                config.level = "info".to_string();
            }
            2 => {
                config.level = "debug".to_string();
                config.source_location = true;
            }
            _ => {
                config.level = "trace".to_string();
                config.source_location = true;
                config.span_events = true;
            }
        }
        config
    }

    /// Apply environment overrides. `RUST_LOG` takes precedence over the
    /// verbosity-derived level.
    pub fn merge_with_env(&mut self) {
        if let Ok(rust_log) = std::env::var("RUST_LOG") {
            self.level = rust_log;
        }
    }
}

/// Initialize the global tracing subscriber
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_new(&config.level)
        .map_err(|e| Error::config(format!("invalid log filter '{}': {}", config.level, e)))?;

    let span_events = if config.span_events {
        tracing_subscriber::fmt::format::FmtSpan::CLOSE
    } else {
        tracing_subscriber::fmt::format::FmtSpan::NONE
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_file(config.source_location)
        .with_line_number(config.source_location)
        .with_span_events(span_events)
        .try_init()
        .map_err(|e| Error::config(format!("failed to initialize logging: {}", e)))?;

    Ok(())
}

/// Performance timing helpers
pub mod timing {
    use std::time::Instant;
    use tracing::debug;

    /// Logs the elapsed time for a named operation when dropped.
    pub struct Timer {
        name: &'static str,
        started: Instant,
    }

    impl Timer {
        pub fn new(name: &'static str) -> Self {
            Self {
                name,
                started: Instant::now(),
            }
        }
    }

    impl Drop for Timer {
        fn drop(&mut self) {
            debug!(
                operation = self.name,
                elapsed_ms = self.started.elapsed().as_millis() as u64,
                "operation finished"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_mapping() {
        assert_eq!(LoggingConfig::from_verbosity(0).level, "warn");
        assert_eq!(LoggingConfig::from_verbosity(1).level, "info");
        let debug = LoggingConfig::from_verbosity(2);
        assert_eq!(debug.level, "debug");
        assert!(debug.source_location);
        let trace = LoggingConfig::from_verbosity(9);
        assert_eq!(trace.level, "trace");
        assert!(trace.span_events);
    }
}
