//! HTTP header plumbing.
//!
//! # Data Flow
//! ```text
//! inbound request (optional)
//!     → context.rs (headers + parsed cookies)
//!     → headers.rs (caller headers, Version, Host, cookies, admin token)
//!     → outbound HeaderMap handed to the REST client
//! ```

pub mod context;
pub mod headers;

pub use context::{InboundContext, X_CONSOLE_HOST};
pub use headers::{HeaderResolver, QRADAR_CSRF, SEC_HEADER, VERSION_HEADER};
