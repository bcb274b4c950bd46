//! Logging setup, driven by environment variables.
//!
//! The crate logs through `tracing` and stays silent unless asked.
//! Applications that already install a subscriber get crivo's events
//! for free; the helpers here are for programs that want a quick
//! setup without wiring `tracing-subscriber` themselves (requires the
//! `tracing-subscriber` feature).
//!
//! # Environment Variables
//!
//! - `CRIVO_DEBUG=true|1|yes` - enable debug logging
//! - `CRIVO_LOG_LEVEL=trace|debug|info|warn|error` - pick a level
//! - `CRIVO_LOG_FORMAT=json|pretty|compact` - output format (default: json)
//!
//! ```rust,no_run
//! use crivo::logging;
//!
//! // Once at startup; later calls are no-ops.
//! logging::init();
//! ```

use std::env;
use std::sync::Once;

static INIT: Once = Once::new();

/// Check if debug logging was requested via `CRIVO_DEBUG`.
///
/// Accepts "true", "1", or "yes", case-insensitive.
#[inline]
pub fn is_debug_enabled() -> bool {
    env::var("CRIVO_DEBUG")
        .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(false)
}

fn default_level() -> &'static str {
    if is_debug_enabled() { "debug" } else { "warn" }
}

/// The log level from `CRIVO_LOG_LEVEL`.
///
/// Unset or unrecognized levels fall back to "debug" when
/// `CRIVO_DEBUG` is on and "warn" otherwise.
pub fn get_log_level() -> &'static str {
    match env::var("CRIVO_LOG_LEVEL") {
        Ok(level) => match level.to_lowercase().as_str() {
            "trace" => "trace",
            "debug" => "debug",
            "info" => "info",
            "warn" => "warn",
            "error" => "error",
            _ => default_level(),
        },
        Err(_) => default_level(),
    }
}

/// The output format from `CRIVO_LOG_FORMAT`.
///
/// Defaults to "json" for structured logging.
pub fn get_log_format() -> &'static str {
    env::var("CRIVO_LOG_FORMAT")
        .map(|format| match format.to_lowercase().as_str() {
            "pretty" => "pretty",
            "compact" => "compact",
            _ => "json",
        })
        .unwrap_or("json")
}

/// Install a subscriber according to the environment.
///
/// Call once at application startup; subsequent calls are no-ops. Does
/// nothing unless `CRIVO_DEBUG` or `CRIVO_LOG_LEVEL` is set, and
/// nothing without the `tracing-subscriber` feature.
pub fn init() {
    INIT.call_once(|| {
        if !is_debug_enabled() && env::var("CRIVO_LOG_LEVEL").is_err() {
            // Nothing requested; leave subscriber installation to the
            // application.
            return;
        }

        #[cfg(feature = "tracing-subscriber")]
        {
            use tracing_subscriber::{EnvFilter, fmt, prelude::*};

            let level = get_log_level();
            let filter = EnvFilter::try_new(format!("crivo={}", level))
                .unwrap_or_else(|_| EnvFilter::new("warn"));

            match get_log_format() {
                "pretty" => {
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(fmt::layer().pretty())
                        .init();
                }
                "compact" => {
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(fmt::layer().compact())
                        .init();
                }
                _ => {
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(fmt::layer().json())
                        .init();
                }
            }

            tracing::info!(
                level = level,
                format = get_log_format(),
                "Crivo logging initialized"
            );
        }
    });
}

/// Initialize logging at a specific level.
///
/// # Safety
///
/// Sets an environment variable, which is unsafe in multi-threaded
/// programs. Call early, before spawning threads.
pub fn init_with_level(level: &str) {
    // SAFETY: Meant for program startup before threads exist; the
    // caller is responsible for that timing.
    unsafe {
        env::set_var("CRIVO_LOG_LEVEL", level);
    }
    init();
}

/// Initialize debug logging, as if `CRIVO_DEBUG=true` were set.
///
/// # Safety
///
/// Sets an environment variable, which is unsafe in multi-threaded
/// programs. Call early, before spawning threads.
pub fn init_debug() {
    // SAFETY: Meant for program startup before threads exist.
    unsafe {
        env::set_var("CRIVO_DEBUG", "true");
    }
    init();
}

/// Debug-log only when `CRIVO_DEBUG` is enabled at runtime.
#[macro_export]
macro_rules! crivo_debug {
    ($($arg:tt)*) => {
        if $crate::logging::is_debug_enabled() {
            tracing::debug!($($arg)*);
        }
    };
}

/// Trace-log only when `CRIVO_DEBUG` is enabled at runtime.
#[macro_export]
macro_rules! crivo_trace {
    ($($arg:tt)*) => {
        if $crate::logging::is_debug_enabled() {
            tracing::trace!($($arg)*);
        }
    };
}
