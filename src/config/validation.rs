//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0)
//! - Reject empty filesystem paths the REST path depends on
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ClientConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;

use crate::config::schema::ClientConfig;
use crate::observability::logging::LogLevel;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check a configuration, collecting every violation.
pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new(
            "timeouts.request_secs",
            "must be greater than zero",
        ));
    }

    let paths = [
        ("tls.console_cert_path", config.tls.console_cert_path.as_os_str().is_empty()),
        ("tls.ca_bundle_path", config.tls.ca_bundle_path.as_os_str().is_empty()),
        ("tls.mounts_path", config.tls.mounts_path.as_os_str().is_empty()),
        ("tls.pki_mount_marker", config.tls.pki_mount_marker.is_empty()),
        ("app.manifest_file", config.app.manifest_file.is_empty()),
    ];
    for (field, empty) in paths {
        if empty {
            errors.push(ValidationError::new(field, "must not be empty"));
        }
    }

    if config.observability.log_level.parse::<LogLevel>().is_err() {
        errors.push(ValidationError::new(
            "observability.log_level",
            format!("unknown level '{}'", config.observability.log_level),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
