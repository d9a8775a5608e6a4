//! Structured logging.
//!
//! Every guard module logs through `tracing` with a consistent field set:
//! - `module`: emitting guard module (circuit-breaker, spend-guard, ...)
//! - `block_height`: host block at which the operation ran
//! - `caller` / `recipient` / `amount` where relevant
//!
//! `init_logging` installs the global subscriber: an `EnvFilter` plus either
//! a human-readable or a JSON fmt layer.

use crate::{TelemetryConfig, TelemetryError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Build the level filter for `config`.
pub fn build_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(&config.log_level).map_err(|e| TelemetryError::Filter(e.to_string()))
}

/// Install the global subscriber.
///
/// Fails if a global subscriber is already set.
pub fn init_logging(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = build_filter(config)?;

    if !config.console_output {
        tracing_subscriber::registry()
            .with(env_filter)
            .try_init()
            .map_err(|e| TelemetryError::AlreadyInitialized(e.to_string()))?;
        return Ok(());
    }

    if config.json_logs {
        // JSON output for containers/production
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(json_layer)
            .try_init()
            .map_err(|e| TelemetryError::AlreadyInitialized(e.to_string()))?;
    } else {
        // Pretty output for development
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .with_ansi(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| TelemetryError::AlreadyInitialized(e.to_string()))?;
    }

    tracing::info!(
        service = %config.full_service_name(),
        log_level = %config.log_level,
        json_logs = config.json_logs,
        "Logging initialized"
    );
    Ok(())
}

/// Log a guard-module event with the standard `module` and `block_height`
/// fields.
///
/// ```rust,ignore
/// log_guard_event!(info, "quarantine", ctx.block_height, "Recipient quarantined",
///     recipient = %recipient, severity = 8);
/// ```
#[macro_export]
macro_rules! log_guard_event {
    ($level:ident, $module:expr, $block_height:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            module = $module,
            block_height = $block_height,
            $($($field)*,)?
            $msg
        )
    };
}

/// Log a transfer pipeline decision with standard fields.
#[macro_export]
macro_rules! log_decision {
    ($level:ident, $block_height:expr, $recipient:expr, $amount:expr, $allowed:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            module = "fortifier",
            block_height = $block_height,
            recipient = %$recipient,
            amount = $amount,
            allowed = $allowed,
            $($($field)*,)?
            $msg
        )
    };
}
