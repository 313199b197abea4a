//! Toolkit for apps running inside the QRadar app framework.
//!
//! Covers authenticated REST calls to the console, the app's proxy URL,
//! manifest access and logging.

pub mod app;
pub mod config;
pub mod facade;
pub mod http;
pub mod net;
pub mod observability;
pub mod rest;

pub use config::ClientConfig;
pub use facade::{AppError, QRadarApp};
pub use http::InboundContext;
pub use observability::logging::{create_log, log, log_str, LogHandle, LogLevel};
pub use rest::{CertVerification, RestError, RestOptions};
