//! Configuration loading from disk and the process environment.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::ClientConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Names the optional TOML file read before the environment overlay.
pub const CONFIG_FILE_ENV: &str = "QRADAR_APPKIT_CONFIG";
pub const CONSOLE_FQDN_ENV: &str = "QRADAR_CONSOLE_FQDN";
pub const CONSOLE_IP_ENV: &str = "QRADAR_CONSOLE_IP";
pub const ADMIN_TOKEN_ENV: &str = "SEC_ADMIN_TOKEN";
pub const SDK_MODE_ENV: &str = "QRADAR_APPFW_SDK";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "IO error reading {}: {}", path.display(), e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(_, e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Validation(_) => None,
        }
    }
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ClientConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
    let config: ClientConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

impl ClientConfig {
    /// Build the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    ///
    /// Starts from the file named by [`CONFIG_FILE_ENV`] (or defaults), then
    /// overlays the console, token and SDK variables. Empty values count as
    /// unset.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let mut config = match lookup(CONFIG_FILE_ENV) {
            Some(path) => load_config(Path::new(&path))?,
            None => ClientConfig::default(),
        };

        if let Some(fqdn) = lookup(CONSOLE_FQDN_ENV) {
            config.console.fqdn = Some(fqdn);
        }
        if let Some(ip) = lookup(CONSOLE_IP_ENV) {
            config.console.ip = Some(ip);
        }
        if let Some(token) = lookup(ADMIN_TOKEN_ENV) {
            config.auth.admin_token = Some(token);
        }
        if let Some(sdk) = lookup(SDK_MODE_ENV) {
            config.sdk_mode = sdk.eq_ignore_ascii_case("true");
        }

        validate_config(&config).map_err(ConfigError::Validation)?;

        tracing::debug!(
            sdk_mode = config.sdk_mode,
            console_fqdn = ?config.console.fqdn,
            console_ip = ?config.console.ip,
            admin_token = config.auth.admin_token.is_some(),
            "Configuration loaded"
        );

        Ok(config)
    }
}
