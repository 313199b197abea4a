//! Structured logging.
//!
//! # Responsibilities
//! - Initialize logging subsystem
//! - Accept the framework's level names (DEBUG .. CRITICAL)
//! - Configure log level at runtime
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Threshold lives behind a reload layer so it can change after init
//! - `log` never fails, even before `create_log`

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing_subscriber::{
    layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter, Registry,
};

/// Target used for messages logged through [`log`].
pub const APP_LOG_TARGET: &str = "qradar_app";

/// Framework log levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    fn directive(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error | LogLevel::Critical => "error",
        }
    }

    fn filter(self) -> EnvFilter {
        EnvFilter::new(self.directive())
    }
}

impl FromStr for LogLevel {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARNING" | "WARN" => Ok(LogLevel::Warning),
            "ERROR" => Ok(LogLevel::Error),
            "CRITICAL" => Ok(LogLevel::Critical),
            _ => Err(LoggingError::UnknownLevel(s.to_string())),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Critical => "CRITICAL",
        };
        f.write_str(name)
    }
}

/// Errors from logging setup.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("unknown log level '{0}'")]
    UnknownLevel(String),

    #[error("logging is already initialized")]
    AlreadyInitialized,

    #[error("failed to change log level: {0}")]
    Reload(#[from] reload::Error),
}

/// Handle to the installed subscriber, used to move the threshold.
#[derive(Clone)]
pub struct LogHandle {
    filter: reload::Handle<EnvFilter, Registry>,
}

impl LogHandle {
    /// Set the threshold log level.
    pub fn set_log_level(&self, level: LogLevel) -> Result<(), LoggingError> {
        self.filter.reload(level.filter())?;
        tracing::debug!(level = %level, "Log level changed");
        Ok(())
    }
}

/// Install the global subscriber with `level` as the threshold.
pub fn create_log(level: LogLevel) -> Result<LogHandle, LoggingError> {
    let (filter, handle) = reload::Layer::new(level.filter());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|_| LoggingError::AlreadyInitialized)?;

    Ok(LogHandle { filter: handle })
}

/// Log `message` at `level`.
pub fn log(message: &str, level: LogLevel) {
    match level {
        LogLevel::Debug => tracing::debug!(target: APP_LOG_TARGET, "{}", message),
        LogLevel::Info => tracing::info!(target: APP_LOG_TARGET, "{}", message),
        LogLevel::Warning => tracing::warn!(target: APP_LOG_TARGET, "{}", message),
        LogLevel::Error => tracing::error!(target: APP_LOG_TARGET, "{}", message),
        LogLevel::Critical => {
            tracing::error!(target: APP_LOG_TARGET, critical = true, "{}", message)
        }
    }
}

/// Log `message` at a level given by name. Unknown names log at INFO.
pub fn log_str(message: &str, level: &str) {
    log(message, level.parse().unwrap_or(LogLevel::Info));
}
