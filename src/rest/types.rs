//! REST request types and error definitions.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use axum::http::HeaderMap;
use reqwest::Method;
use serde_json::Value;
use thiserror::Error;

use crate::app::console::ConsoleError;
use crate::rest::verify::CertVerification;

/// Boxed error produced by a transport.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Verbs the console REST API accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RestMethod {
    Get,
    Put,
    Post,
    Delete,
}

impl RestMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            RestMethod::Get => "GET",
            RestMethod::Put => "PUT",
            RestMethod::Post => "POST",
            RestMethod::Delete => "DELETE",
        }
    }
}

impl FromStr for RestMethod {
    type Err = RestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(RestMethod::Get),
            "PUT" => Ok(RestMethod::Put),
            "POST" => Ok(RestMethod::Post),
            "DELETE" => Ok(RestMethod::Delete),
            _ => Err(RestError::InvalidMethod(s.to_string())),
        }
    }
}

impl fmt::Display for RestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<RestMethod> for Method {
    fn from(method: RestMethod) -> Self {
        match method {
            RestMethod::Get => Method::GET,
            RestMethod::Put => Method::PUT,
            RestMethod::Post => Method::POST,
            RestMethod::Delete => Method::DELETE,
        }
    }
}

/// Optional parts of a REST call.
#[derive(Debug, Clone)]
pub struct RestOptions {
    pub headers: Option<HeaderMap>,
    /// Raw request body.
    pub body: Option<Vec<u8>>,
    /// Query string parameters.
    pub params: Vec<(String, String)>,
    pub json_body: Option<Value>,
    /// API version, sent as the `Version` header.
    pub version: Option<String>,
    /// `None` lets the client decide.
    pub verify: Option<CertVerification>,
    /// `None` uses the client's default timeout.
    pub timeout: Option<Duration>,
}

impl Default for RestOptions {
    fn default() -> Self {
        Self {
            headers: None,
            body: None,
            params: Vec::new(),
            json_body: None,
            version: None,
            verify: None,
            timeout: None,
        }
    }
}

/// Fully resolved request handed to a transport.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub method: RestMethod,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
    pub params: Vec<(String, String)>,
    pub json_body: Option<Value>,
    pub timeout: Duration,
    pub verify: CertVerification,
}

/// Errors from a REST call.
#[derive(Debug, Error)]
pub enum RestError {
    /// Verb outside GET/PUT/POST/DELETE.
    #[error("invalid REST method '{0}': expected GET, PUT, POST or DELETE")]
    InvalidMethod(String),

    /// No console address configured.
    #[error(transparent)]
    Console(#[from] ConsoleError),

    /// The transport failed; the original error is the source.
    #[error("request failed: {0}")]
    Transport(#[source] BoxError),
}

pub type RestResult<T> = Result<T, RestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_parsing() {
        assert_eq!("GET".parse::<RestMethod>().unwrap(), RestMethod::Get);
        assert_eq!("DELETE".parse::<RestMethod>().unwrap(), RestMethod::Delete);
        for bad in ["PATCH", "HEAD", "get", ""] {
            assert!(matches!(
                bad.parse::<RestMethod>(),
                Err(RestError::InvalidMethod(ref m)) if m == bad
            ));
        }
    }

    #[test]
    fn test_method_conversion() {
        assert_eq!(Method::from(RestMethod::Put), Method::PUT);
        assert_eq!(RestMethod::Post.to_string(), "POST");
    }

    #[test]
    fn test_default_options() {
        let options = RestOptions::default();
        assert!(options.timeout.is_none());
        assert!(options.verify.is_none());
        assert!(options.params.is_empty());
    }

    #[test]
    fn test_error_display() {
        let err = RestError::InvalidMethod("PATCH".into());
        assert!(err.to_string().contains("PATCH"));

        let err = RestError::from(ConsoleError::Unset("QRADAR_CONSOLE_IP"));
        assert_eq!(err.to_string(), "QRADAR_CONSOLE_IP is not set");
    }
}
