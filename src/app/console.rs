//! Console addressing.

use thiserror::Error;

use crate::config::loader::{CONSOLE_FQDN_ENV, CONSOLE_IP_ENV};
use crate::config::ConsoleConfig;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConsoleError {
    /// The named setting was not configured.
    #[error("{0} is not set")]
    Unset(&'static str),
}

/// Where the console can be reached.
#[derive(Debug, Clone, Default)]
pub struct ConsoleAddress {
    fqdn: Option<String>,
    ip: Option<String>,
}

impl ConsoleAddress {
    pub fn new(fqdn: Option<String>, ip: Option<String>) -> Self {
        Self { fqdn, ip }
    }

    pub fn from_config(config: &ConsoleConfig) -> Self {
        Self::new(config.fqdn.clone(), config.ip.clone())
    }

    /// Console IP address.
    pub fn ip(&self) -> Result<&str, ConsoleError> {
        self.ip.as_deref().ok_or(ConsoleError::Unset(CONSOLE_IP_ENV))
    }

    /// Console fully-qualified domain name.
    pub fn fqdn(&self) -> Result<&str, ConsoleError> {
        self.fqdn.as_deref().ok_or(ConsoleError::Unset(CONSOLE_FQDN_ENV))
    }

    /// Host to send REST calls to: the FQDN verbatim when set, else the IP.
    pub fn rest_target(&self) -> Result<&str, ConsoleError> {
        match self.fqdn.as_deref() {
            Some(fqdn) => Ok(fqdn),
            None => self.ip(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fqdn_wins_for_rest() {
        let console = ConsoleAddress::new(Some("console.corp".into()), Some("10.0.0.1".into()));
        assert_eq!(console.rest_target().unwrap(), "console.corp");
        assert_eq!(console.ip().unwrap(), "10.0.0.1");
    }

    #[test]
    fn test_falls_back_to_ip() {
        let console = ConsoleAddress::new(None, Some("10.0.0.1".into()));
        assert_eq!(console.rest_target().unwrap(), "10.0.0.1");
        assert_eq!(console.fqdn(), Err(ConsoleError::Unset("QRADAR_CONSOLE_FQDN")));
    }

    #[test]
    fn test_unset() {
        let console = ConsoleAddress::default();
        let err = console.rest_target().unwrap_err();
        assert_eq!(err.to_string(), "QRADAR_CONSOLE_IP is not set");
    }
}
