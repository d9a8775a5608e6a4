//! # Fortifier Telemetry
//!
//! Structured logging for the guard modules.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fortifier_telemetry::{init_logging, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_logging(&config)?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `FT_SERVICE_NAME` | `fortifier` | Service name in logs |
//! | `FT_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `FT_CONSOLE_OUTPUT` | `true` | Enable console output |
//! | `FT_JSON_LOGS` | `false` (`true` in containers) | JSON log lines |
//! | `FT_NETWORK` | `testnet` | Deployment network |

#![warn(missing_docs)]

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::{build_filter, init_logging};

use thiserror::Error;

/// Telemetry initialization errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TelemetryError {
    /// The log level directive could not be parsed.
    #[error("Invalid log filter: {0}")]
    Filter(String),

    /// A global subscriber is already installed.
    #[error("Failed to install subscriber: {0}")]
    AlreadyInitialized(String),
}
