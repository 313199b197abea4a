//! Outbound header resolution.
//!
//! # Responsibilities
//! - Merge caller headers with the protocol version and local `Host`
//! - Forward CSRF and security-token cookies of the inbound request
//! - Apply the admin token override
//!
//! # Design Decisions
//! - Build order is fixed; later steps overwrite earlier ones
//! - Never fails: a missing or unusable input omits that header
//!
//! ```text
//! caller headers ─▶ Version ─▶ Host (if absent) ─▶ inbound cookies ─▶ admin token
//! ```

use axum::http::header::HOST;
use axum::http::{HeaderMap, HeaderName, HeaderValue};

use crate::http::context::InboundContext;
use crate::net::HostResolver;

/// CSRF cookie, forwarded under the same header name.
pub const QRADAR_CSRF: &str = "QRadarCSRF";
/// Security token cookie and header.
pub const SEC_HEADER: &str = "SEC";
pub const VERSION_HEADER: &str = "Version";

/// Produces the header map sent upstream.
#[derive(Debug, Clone)]
pub struct HeaderResolver<R> {
    admin_token: Option<String>,
    resolver: R,
}

impl<R: HostResolver> HeaderResolver<R> {
    pub fn new(admin_token: Option<String>, resolver: R) -> Self {
        Self {
            admin_token: admin_token.filter(|t| !t.is_empty()),
            resolver,
        }
    }

    /// Headers for a call to a live console.
    pub fn resolve(
        &self,
        caller: Option<HeaderMap>,
        version: Option<&str>,
        inbound: Option<&InboundContext>,
    ) -> HeaderMap {
        let mut headers = last_values(caller);

        if let Some(version) = version {
            set_header(&mut headers, VERSION_HEADER, version);
        }

        if !headers.contains_key(HOST) {
            match self.resolver.local_address() {
                Some(ip) => set_header(&mut headers, HOST.as_str(), &ip.to_string()),
                None => tracing::debug!("Local hostname did not resolve, omitting Host header"),
            }
        }

        if let Some(inbound) = inbound {
            if let Some(csrf) = inbound.cookie(QRADAR_CSRF) {
                set_header(&mut headers, QRADAR_CSRF, csrf);
            }
            if !headers.contains_key(SEC_HEADER) {
                if let Some(sec) = inbound.cookie(SEC_HEADER) {
                    set_header(&mut headers, SEC_HEADER, sec);
                }
            }
        }

        self.apply_admin_token(&mut headers);
        headers
    }

    /// Headers for a call to the SDK console: no `Host`, no cookies.
    pub fn resolve_sdk(&self, caller: Option<HeaderMap>, version: Option<&str>) -> HeaderMap {
        let mut headers = last_values(caller);
        if let Some(version) = version {
            set_header(&mut headers, VERSION_HEADER, version);
        }
        self.apply_admin_token(&mut headers);
        headers
    }

    fn apply_admin_token(&self, headers: &mut HeaderMap) {
        if let Some(token) = &self.admin_token {
            set_header(headers, SEC_HEADER, token);
        }
    }
}

/// Caller headers with one value per key: the last one appended.
fn last_values(caller: Option<HeaderMap>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let mut current: Option<HeaderName> = None;
    for (name, value) in caller.unwrap_or_default() {
        if name.is_some() {
            current = name;
        }
        if let Some(name) = &current {
            headers.insert(name.clone(), value);
        }
    }
    headers
}

/// Insert `name: value`, replacing any existing value. Unusable names or
/// values are skipped.
fn set_header(headers: &mut HeaderMap, name: &str, value: &str) {
    let name = match HeaderName::from_bytes(name.as_bytes()) {
        Ok(name) => name,
        Err(_) => {
            tracing::debug!(header = %name, "Skipping invalid header name");
            return;
        }
    };
    match HeaderValue::from_str(value) {
        Ok(value) => {
            headers.insert(name, value);
        }
        Err(_) => tracing::debug!(header = %name, "Skipping invalid header value"),
    }
}
