//! Inbound request context.
//!
//! # Responsibilities
//! - Carry the headers and cookies of the request the app is serving
//! - Parse `Cookie` headers into name/value pairs
//! - Extract itself from an axum request
//!
//! # Design Decisions
//! - Passed explicitly; `None` means "not serving a request"
//! - Header lookup is case-insensitive, cookie lookup is not

use std::collections::HashMap;
use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::COOKIE;
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderName, HeaderValue};

/// Header naming the console host that proxied the inbound request.
pub const X_CONSOLE_HOST: &str = "x-console-host";

/// Headers and cookies of the inbound request being served.
#[derive(Debug, Clone, Default)]
pub struct InboundContext {
    headers: HeaderMap,
    cookies: HashMap<String, String>,
}

impl InboundContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a context from raw inbound headers.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut cookies = HashMap::new();
        for value in headers.get_all(COOKIE) {
            match value.to_str() {
                Ok(raw) => parse_cookie_header(raw, &mut cookies),
                Err(_) => tracing::debug!("Skipping non-text Cookie header"),
            }
        }
        Self {
            headers: headers.clone(),
            cookies,
        }
    }

    /// Add a header. Invalid names or values are ignored.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                self.headers.insert(name, value);
            }
            _ => tracing::debug!(header = %name, "Ignoring invalid inbound header"),
        }
        self
    }

    pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.insert(name.into(), value.into());
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    /// The `X-Console-Host` hint, if the console forwarded one.
    pub fn console_host(&self) -> Option<&str> {
        self.header(X_CONSOLE_HOST)
    }
}

fn parse_cookie_header(raw: &str, cookies: &mut HashMap<String, String>) {
    for pair in raw.split(';') {
        let Some((name, value)) = pair.split_once('=') else {
            continue;
        };
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        let value = value.trim();
        let value = value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .unwrap_or(value);
        cookies.insert(name.to_string(), value.to_string());
    }
}

impl<S> FromRequestParts<S> for InboundContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    #[test]
    fn test_cookie_parsing() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("SEC=abc123; QRadarCSRF=\"tok\"; junk"));
        headers.append(COOKIE, HeaderValue::from_static("theme=dark"));

        let ctx = InboundContext::from_headers(&headers);
        assert_eq!(ctx.cookie("SEC"), Some("abc123"));
        assert_eq!(ctx.cookie("QRadarCSRF"), Some("tok"));
        assert_eq!(ctx.cookie("theme"), Some("dark"));
        assert_eq!(ctx.cookie("junk"), None);
        assert_eq!(ctx.cookie("sec"), None);
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let ctx = InboundContext::new().with_header("X-Console-Host", "console.corp:443");
        assert_eq!(ctx.header("x-console-host"), Some("console.corp:443"));
        assert_eq!(ctx.console_host(), Some("console.corp:443"));
    }

    #[test]
    fn test_invalid_header_ignored() {
        let ctx = InboundContext::new().with_header("bad header", "v");
        assert_eq!(ctx.header("bad header"), None);
    }

    #[tokio::test]
    async fn test_extractor() {
        let request = Request::builder()
            .uri("/index")
            .header("X-Console-Host", "10.0.0.1")
            .header("Cookie", "SEC=s3c")
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();

        let ctx = InboundContext::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(ctx.console_host(), Some("10.0.0.1"));
        assert_eq!(ctx.cookie("SEC"), Some("s3c"));
    }
}
