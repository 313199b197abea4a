//! Console REST subsystem.
//!
//! # Data Flow
//! ```text
//! rest(verb, path, options, inbound)
//!     → types.rs (verb validation)
//!     → http::headers (outbound header map)
//!     → app::console (FQDN override or console IP)
//!     → verify.rs (console cert / CA bundle / disabled)
//!     → transport.rs (reqwest)
//!     → response returned as-is
//! ```

pub mod client;
pub mod transport;
pub mod types;
pub mod verify;

pub use client::{RestClient, RestMode};
pub use transport::{ReqwestTransport, Transport};
pub use types::{BoxError, OutboundRequest, RestError, RestMethod, RestOptions, RestResult};
pub use verify::{CertResolver, CertVerification};
