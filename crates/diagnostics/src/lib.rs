// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Logging setup shared by the hostfile crates
//!
//! Verbosity is taken from the `HOSTFILE_LOG` environment variable:
//! - `off` (default) - no logs
//! - `error`, `warn`, `info` - progressively more operational detail
//! - `debug` - stream opens, restats, link resolution, digest work

use std::str::FromStr;
use std::sync::Once;

// Re-export emit so macros can use it
pub use emit;

/// Environment variable consulted by [`init`]
pub const LOG_ENV: &str = "HOSTFILE_LOG";

static INIT: Once = Once::new();

/// Minimum level of events that reach stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "off" => Ok(LogLevel::Off),
            "error" => Ok(LogLevel::Error),
            "warn" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            other => Err(other.to_string()),
        }
    }
}

impl LogLevel {
    fn emit_level(self) -> Option<emit::Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(emit::Level::Error),
            LogLevel::Warn => Some(emit::Level::Warn),
            LogLevel::Info => Some(emit::Level::Info),
            LogLevel::Debug => Some(emit::Level::Debug),
        }
    }
}

/// Initialize logging from `HOSTFILE_LOG`.
///
/// Safe to call more than once; only the first call (of this or
/// [`init_with_level`]) has any effect.
pub fn init() {
    let raw = std::env::var(LOG_ENV).unwrap_or_default();
    match raw.parse::<LogLevel>() {
        Ok(level) => init_with_level(level),
        Err(unknown) => {
            init_with_level(LogLevel::Info);
            let env = LOG_ENV;
            emit::warn!(
                "Unknown {env} value {unknown}, using info",
                env: env,
                unknown: unknown
            );
        }
    }
}

/// Initialize logging with an explicit level, ignoring the environment.
pub fn init_with_level(level: LogLevel) {
    INIT.call_once(|| {
        let Some(min) = level.emit_level() else {
            return;
        };
        let rt = emit::setup()
            .emit_to(emit_term::stderr())
            .emit_when(emit::level::min_filter(min))
            .init();

        // The runtime lives for the rest of the process
        std::mem::forget(rt);
    });
}

/// Log detailed diagnostics (opens, restats, digest recomputation)
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        $crate::emit::debug!($($arg)*)
    };
}

/// Log operations a user may want to see in normal usage
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::emit::info!($($arg)*)
    };
}

/// Log recoverable problems (unreadable links, failed cleanup)
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::emit::warn!($($arg)*)
    };
}

/// Log failures that stop an operation
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::emit::error!($($arg)*)
    };
}
