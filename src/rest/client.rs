//! Console REST client.
//!
//! # Responsibilities
//! - Validate the verb before any I/O
//! - Resolve headers, console address and certificate verification
//! - Hand one request to the transport and return its response untouched
//!
//! # Design Decisions
//! - No retries and no status-code interpretation
//! - Live and SDK consoles differ only in header and verification rules

use std::time::Duration;

use crate::app::console::ConsoleAddress;
use crate::http::{HeaderResolver, InboundContext};
use crate::net::HostResolver;
use crate::rest::transport::Transport;
use crate::rest::types::{OutboundRequest, RestError, RestMethod, RestOptions, RestResult};
use crate::rest::verify::CertResolver;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Which console the client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestMode {
    /// A deployed console.
    Live,
    /// The local development console.
    Sdk,
}

/// Issues REST calls against the console.
pub struct RestClient<T, R> {
    mode: RestMode,
    console: ConsoleAddress,
    headers: HeaderResolver<R>,
    certs: CertResolver,
    transport: T,
    default_timeout: Duration,
}

impl<T: Transport, R: HostResolver> RestClient<T, R> {
    pub fn new(
        mode: RestMode,
        console: ConsoleAddress,
        headers: HeaderResolver<R>,
        certs: CertResolver,
        transport: T,
    ) -> Self {
        Self {
            mode,
            console,
            headers,
            certs,
            transport,
            default_timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Timeout for calls that do not set their own.
    pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send `verb` to `https://{console}/{path}`.
    pub async fn rest(
        &self,
        verb: &str,
        path: &str,
        options: RestOptions,
        inbound: Option<&InboundContext>,
    ) -> RestResult<T::Response> {
        let method: RestMethod = verb.parse()?;
        let version = options.version.clone();
        let request = self.prepare(method, path, options, inbound)?;

        tracing::debug!(
            method = %request.method,
            url = %request.url,
            headers = ?request.headers,
            body = ?request.body.as_deref().map(String::from_utf8_lossy),
            params = ?request.params,
            json_body = ?request.json_body,
            verify = %request.verify,
            version = ?version,
            "REST request"
        );

        self.transport.send(request).await.map_err(RestError::Transport)
    }

    /// Build the request without sending it.
    pub fn prepare(
        &self,
        method: RestMethod,
        path: &str,
        options: RestOptions,
        inbound: Option<&InboundContext>,
    ) -> RestResult<OutboundRequest> {
        let RestOptions {
            headers,
            body,
            params,
            json_body,
            version,
            verify,
            timeout,
        } = options;

        let headers = match self.mode {
            RestMode::Live => self.headers.resolve(headers, version.as_deref(), inbound),
            RestMode::Sdk => self.headers.resolve_sdk(headers, version.as_deref()),
        };

        let console = self.console.rest_target()?;
        let url = format!("https://{}/{}", console, path);

        let verify = match self.mode {
            RestMode::Live => self.certs.resolve(verify),
            RestMode::Sdk => self.certs.resolve_sdk(verify),
        };

        Ok(OutboundRequest {
            method,
            url,
            headers,
            body,
            params,
            json_body,
            timeout: timeout.unwrap_or(self.default_timeout),
            verify,
        })
    }
}
