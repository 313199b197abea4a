//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional TOML file (QRADAR_APPKIT_CONFIG)
//!     → loader.rs (parse & deserialize)
//!     → environment overlay (console, admin token, SDK flag)
//!     → validation.rs (semantic checks)
//!     → ClientConfig (validated, immutable)
//!     → handed to the facade and REST client at construction
//! ```
//!
//! # Design Decisions
//! - Config is read once; nothing reads the environment at call time
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::ClientConfig;
pub use schema::ConsoleConfig;
pub use schema::TlsConfig;
pub use schema::AppPathsConfig;
