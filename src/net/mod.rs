//! Network identity of the local process.

pub mod hostname;

pub use hostname::{HostResolver, SystemHostResolver};
