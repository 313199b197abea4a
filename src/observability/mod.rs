//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events with structured fields
//!
//! App code produces:
//!     → logging::log (framework level names, `qradar_app` target)
//!
//! Consumers:
//!     → fmt layer on stdout, filtered by a reloadable threshold
//! ```

pub mod logging;

pub use logging::{create_log, log, log_str, LogHandle, LogLevel, LoggingError};
