//! Single entry point bundling config, manifest and REST client.

use std::path::PathBuf;
use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

use crate::app::{self, ConsoleAddress, ConsoleError, Manifest, ManifestError};
use crate::config::{ClientConfig, ConfigError};
use crate::http::{HeaderResolver, InboundContext};
use crate::net::{HostResolver, SystemHostResolver};
use crate::rest::{
    CertResolver, ReqwestTransport, RestClient, RestMode, RestOptions, RestResult, Transport,
};

/// Errors from building a [`QRadarApp`].
#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// An app running inside the app framework.
pub struct QRadarApp<T = ReqwestTransport, R = SystemHostResolver> {
    config: ClientConfig,
    manifest: Manifest,
    console: ConsoleAddress,
    rest: RestClient<T, R>,
}

impl QRadarApp {
    /// Configure from the environment and load the manifest from the app root.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_config(ClientConfig::from_env()?)
    }

    /// Load the manifest named by `config` and use the reqwest transport.
    pub fn from_config(config: ClientConfig) -> Result<Self, AppError> {
        let manifest = Manifest::load(&config.app.manifest_path())?;
        Ok(Self::new(config, manifest, ReqwestTransport::new()?, SystemHostResolver))
    }
}

impl<T: Transport, R: HostResolver> QRadarApp<T, R> {
    pub fn new(config: ClientConfig, manifest: Manifest, transport: T, resolver: R) -> Self {
        let mode = if config.sdk_mode { RestMode::Sdk } else { RestMode::Live };
        let console = ConsoleAddress::from_config(&config.console);
        let rest = RestClient::new(
            mode,
            console.clone(),
            HeaderResolver::new(config.auth.admin_token.clone(), resolver),
            CertResolver::new(config.tls.clone()),
            transport,
        )
        .with_default_timeout(Duration::from_secs(config.timeouts.request_secs));

        tracing::info!(sdk_mode = config.sdk_mode, app_id = manifest.app_id(), "App kit ready");

        Self {
            config,
            manifest,
            console,
            rest,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn rest_client(&self) -> &RestClient<T, R> {
        &self.rest
    }

    /// True when running against the SDK console rather than a deployment.
    pub fn is_sdk(&self) -> bool {
        self.config.sdk_mode
    }

    // ==== App details ====

    /// Manifest `app_id`, or 0 when absent.
    pub fn app_id(&self) -> u64 {
        self.manifest.app_id()
    }

    pub fn app_name(&self) -> Result<&str, ManifestError> {
        self.manifest.app_name()
    }

    pub fn manifest_json(&self) -> &Value {
        self.manifest.json()
    }

    /// Manifest value for `key`. Without a default a missing key is an error.
    pub fn manifest_field_value(
        &self,
        key: &str,
        default: Option<Value>,
    ) -> Result<Value, ManifestError> {
        match (self.manifest.field(key), default) {
            (Ok(value), _) => Ok(value.clone()),
            (Err(_), Some(default)) => Ok(default),
            (Err(e), None) => Err(e),
        }
    }

    pub fn root_path(&self, relative: &str) -> PathBuf {
        app::root_path(&self.config.app, relative)
    }

    pub fn store_path(&self, relative: &str) -> PathBuf {
        app::store_path(&self.config.app, relative)
    }

    /// Proxy prefix for this app's endpoints; empty when it cannot be built.
    /// The SDK console serves endpoints at its root, so the prefix is empty.
    pub fn app_base_url(&self, inbound: Option<&InboundContext>) -> String {
        if self.is_sdk() {
            return String::new();
        }
        app::app_base_url(&self.manifest, inbound)
    }

    /// Proxy prefix joined with an endpoint path.
    pub fn url_for(&self, endpoint_path: &str, inbound: Option<&InboundContext>) -> String {
        self.app_base_url(inbound) + endpoint_path
    }

    pub fn console_address(&self) -> Result<&str, ConsoleError> {
        self.console.ip()
    }

    pub fn console_fqdn(&self) -> Result<&str, ConsoleError> {
        self.console.fqdn()
    }

    // ==== REST ====

    /// Call the console REST API. Fails with
    /// [`RestError::InvalidMethod`](crate::rest::RestError::InvalidMethod)
    /// unless `verb` is GET, PUT, POST or DELETE.
    pub async fn rest(
        &self,
        verb: &str,
        path: &str,
        options: RestOptions,
        inbound: Option<&InboundContext>,
    ) -> RestResult<T::Response> {
        self.rest.rest(verb, path, options, inbound).await
    }
}
