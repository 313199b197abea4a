//! Certificate verification for console calls.
//!
//! # Responsibilities
//! - Force the console certificate when it is present on disk
//! - Pick the PKI CA bundle when its mount is present
//! - Otherwise turn verification off
//!
//! # Design Decisions
//! - Re-evaluated on every call; mount state is read, never cached
//! - An unreadable mount table counts as "not mounted"

use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::config::TlsConfig;

/// How the server certificate is checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CertVerification {
    /// Trust only the PEM bundle at this path.
    Bundle(PathBuf),
    /// Trust the built-in roots.
    Enabled,
    /// Accept any certificate.
    Disabled,
}

impl fmt::Display for CertVerification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CertVerification::Bundle(path) => write!(f, "{}", path.display()),
            CertVerification::Enabled => f.write_str("true"),
            CertVerification::Disabled => f.write_str("false"),
        }
    }
}

/// Resolves the verification setting from the local filesystem.
#[derive(Debug, Clone)]
pub struct CertResolver {
    config: TlsConfig,
}

impl CertResolver {
    pub fn new(config: TlsConfig) -> Self {
        Self { config }
    }

    /// Setting for a live console call.
    ///
    /// The console certificate, when present, replaces whatever the caller
    /// asked for. An explicit bundle path is otherwise kept; anything else
    /// is resolved automatically.
    pub fn resolve(&self, requested: Option<CertVerification>) -> CertVerification {
        if self.config.console_cert_path.is_file() {
            return CertVerification::Bundle(self.config.console_cert_path.clone());
        }
        match requested {
            Some(CertVerification::Bundle(path)) => CertVerification::Bundle(path),
            _ => self.ca_bundle(),
        }
    }

    /// Setting for an SDK console call: explicit choices are kept, the
    /// default is no verification.
    pub fn resolve_sdk(&self, requested: Option<CertVerification>) -> CertVerification {
        requested.unwrap_or(CertVerification::Disabled)
    }

    /// The CA bundle if the PKI mount is present, otherwise disabled.
    pub fn ca_bundle(&self) -> CertVerification {
        let mounted = match fs::read_to_string(&self.config.mounts_path) {
            Ok(mounts) => mounts.contains(&self.config.pki_mount_marker),
            Err(e) => {
                tracing::debug!(
                    mounts = %self.config.mounts_path.display(),
                    error = %e,
                    "Cannot read mount table"
                );
                false
            }
        };

        if mounted {
            tracing::debug!(
                bundle = %self.config.ca_bundle_path.display(),
                "Using ca bundle cert from file"
            );
            CertVerification::Bundle(self.config.ca_bundle_path.clone())
        } else {
            tracing::debug!(
                marker = %self.config.pki_mount_marker,
                "PKI mount not present in the container, verify will be turned off"
            );
            CertVerification::Disabled
        }
    }
}
