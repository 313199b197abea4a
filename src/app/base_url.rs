//! App proxy URL construction.
//!
//! The console proxies app requests through
//! `https://{console}/console/plugins/{app_id}/app_proxy`. The console host
//! comes from the inbound `X-Console-Host` header, falling back to the
//! manifest's `console_ip`.

use crate::app::manifest::Manifest;
use crate::http::InboundContext;

/// Result of building the proxy URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaseUrlOutcome {
    Built(String),
    /// Manifest has no usable `app_id`.
    MissingAppId,
    /// No `X-Console-Host` header and no manifest `console_ip`.
    MissingConsoleAddress,
}

impl BaseUrlOutcome {
    /// The URL, or an empty string on failure.
    pub fn into_url(self) -> String {
        match self {
            BaseUrlOutcome::Built(url) => url,
            _ => String::new(),
        }
    }
}

pub fn resolve_base_url(manifest: &Manifest, inbound: Option<&InboundContext>) -> BaseUrlOutcome {
    let app_id = match manifest.text("app_id").filter(|id| !id.is_empty()) {
        Some(id) => id,
        None => return BaseUrlOutcome::MissingAppId,
    };
    let suffix = format!("/console/plugins/{}/app_proxy", app_id);

    if let Some(host) = inbound.and_then(InboundContext::console_host) {
        return BaseUrlOutcome::Built(format!("https://{}{}", host, suffix));
    }

    match manifest.text("console_ip").filter(|ip| !ip.is_empty()) {
        Some(ip) => BaseUrlOutcome::Built(format!("https://{}{}", ip, suffix)),
        None => BaseUrlOutcome::MissingConsoleAddress,
    }
}

/// Proxy URL for this app, or an empty string when it cannot be built.
/// Failures are logged, never returned.
pub fn app_base_url(manifest: &Manifest, inbound: Option<&InboundContext>) -> String {
    let outcome = resolve_base_url(manifest, inbound);
    match &outcome {
        BaseUrlOutcome::MissingAppId => {
            tracing::error!("app_id not found in manifest, cannot build app base url");
            return String::new();
        }
        BaseUrlOutcome::MissingConsoleAddress => {
            tracing::error!("console_ip not found in manifest, cannot build app base url");
        }
        BaseUrlOutcome::Built(_) => {}
    }

    let url = outcome.into_url();
    tracing::debug!(proxy_path = %url, "Resolved app base url");
    url
}
