//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the app kit.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration for an app running inside the app framework.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ClientConfig {
    /// Console addressing (FQDN override, IP).
    pub console: ConsoleConfig,

    /// Credentials injected into outbound requests.
    pub auth: AuthConfig,

    /// Route REST calls to the local SDK console instead of a live one.
    pub sdk_mode: bool,

    /// Certificate verification inputs.
    pub tls: TlsConfig,

    /// App filesystem layout.
    pub app: AppPathsConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Console addressing.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Fully-qualified domain name; used verbatim for REST calls when set.
    pub fqdn: Option<String>,

    /// Console IP address.
    pub ip: Option<String>,
}

/// Credentials for outbound requests.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AuthConfig {
    /// Admin security token. Overrides any `SEC` header when present.
    pub admin_token: Option<String>,
}

/// Certificate verification inputs.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TlsConfig {
    /// Console certificate. When this file exists it is always used.
    pub console_cert_path: PathBuf,

    /// CA bundle used when the PKI mount is present.
    pub ca_bundle_path: PathBuf,

    /// Mount table to inspect.
    pub mounts_path: PathBuf,

    /// Mount point whose presence enables the CA bundle.
    pub pki_mount_marker: String,
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            console_cert_path: PathBuf::from("/store/consolecert.pem"),
            ca_bundle_path: PathBuf::from("/opt/app-root/etc/pki/tls/certs/ca-bundle.crt"),
            mounts_path: PathBuf::from("/proc/mounts"),
            pki_mount_marker: "/etc/qradar_pki".to_string(),
        }
    }
}

/// App filesystem layout.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppPathsConfig {
    /// App root directory.
    pub root_path: PathBuf,

    /// Persistent store directory.
    pub store_path: PathBuf,

    /// Manifest file name, relative to `root_path`.
    pub manifest_file: String,
}

impl Default for AppPathsConfig {
    fn default() -> Self {
        Self {
            root_path: PathBuf::from("/opt/app-root"),
            store_path: PathBuf::from("/opt/app-root/store"),
            manifest_file: "manifest.json".to_string(),
        }
    }
}

impl AppPathsConfig {
    /// Full path of the manifest file.
    pub fn manifest_path(&self) -> PathBuf {
        self.root_path.join(&self.manifest_file)
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Default REST request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 60 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log threshold (DEBUG, INFO, WARNING, ERROR, CRITICAL).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "INFO".to_string(),
        }
    }
}
