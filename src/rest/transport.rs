//! HTTP transport for console calls.

use std::collections::HashMap;
use std::fs;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use reqwest::{Certificate, Client, ClientBuilder, Response};

use crate::rest::types::{BoxError, OutboundRequest};
use crate::rest::verify::CertVerification;

/// Sends a fully resolved request.
pub trait Transport: Send + Sync {
    type Response: Send;

    fn send(
        &self,
        request: OutboundRequest,
    ) -> impl Future<Output = Result<Self::Response, BoxError>> + Send;
}

/// [`Transport`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    verified: Client,
    unverified: Client,
    /// Clients trusting one CA bundle each, keyed by bundle path.
    bundles: Arc<Mutex<HashMap<PathBuf, Client>>>,
    env_proxy: bool,
}

impl ReqwestTransport {
    /// Transport honoring the `HTTPS_PROXY`/`NO_PROXY` environment.
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::build(true)
    }

    /// Transport that always connects directly.
    pub fn direct() -> Result<Self, reqwest::Error> {
        Self::build(false)
    }

    fn build(env_proxy: bool) -> Result<Self, reqwest::Error> {
        Ok(Self {
            verified: base_builder(env_proxy).build()?,
            unverified: base_builder(env_proxy)
                .danger_accept_invalid_certs(true)
                .build()?,
            bundles: Arc::default(),
            env_proxy,
        })
    }

    /// Client matching the verification setting. A bundle is read the first
    /// time its path is seen; later calls reuse that client.
    fn client_for(&self, verify: &CertVerification) -> Result<Client, BoxError> {
        match verify {
            CertVerification::Enabled => Ok(self.verified.clone()),
            CertVerification::Disabled => Ok(self.unverified.clone()),
            CertVerification::Bundle(path) => {
                let mut bundles = self.bundles.lock().unwrap_or_else(PoisonError::into_inner);
                if let Some(client) = bundles.get(path) {
                    return Ok(client.clone());
                }
                let client = self.bundle_client(path)?;
                bundles.insert(path.clone(), client.clone());
                Ok(client)
            }
        }
    }

    /// Client that trusts only the certificates in `path`.
    fn bundle_client(&self, path: &Path) -> Result<Client, BoxError> {
        let pem = fs::read(path).map_err(|e| -> BoxError {
            format!("failed to read CA bundle {}: {}", path.display(), e).into()
        })?;
        let mut builder = base_builder(self.env_proxy).tls_built_in_root_certs(false);
        for cert in Certificate::from_pem_bundle(&pem)? {
            builder = builder.add_root_certificate(cert);
        }
        tracing::debug!(bundle = %path.display(), "Built client for CA bundle");
        Ok(builder.build()?)
    }
}

fn base_builder(env_proxy: bool) -> ClientBuilder {
    let builder = Client::builder();
    if env_proxy {
        builder
    } else {
        builder.no_proxy()
    }
}

impl Transport for ReqwestTransport {
    type Response = Response;

    async fn send(&self, request: OutboundRequest) -> Result<Response, BoxError> {
        let client = self.client_for(&request.verify)?;

        let mut builder = client
            .request(request.method.into(), &request.url)
            .headers(request.headers)
            .timeout(request.timeout);
        if !request.params.is_empty() {
            builder = builder.query(&request.params);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }
        if let Some(json) = &request.json_body {
            builder = builder.json(json);
        }

        Ok(builder.send().await?)
    }
}
