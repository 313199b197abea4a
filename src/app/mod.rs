//! App metadata: manifest, filesystem layout, console address and proxy URL.

pub mod base_url;
pub mod console;
pub mod manifest;

use std::path::{Path, PathBuf};

use crate::config::AppPathsConfig;

pub use base_url::{app_base_url, resolve_base_url, BaseUrlOutcome};
pub use console::{ConsoleAddress, ConsoleError};
pub use manifest::{Manifest, ManifestError};

/// App root joined with `relative`.
pub fn root_path(paths: &AppPathsConfig, relative: impl AsRef<Path>) -> PathBuf {
    paths.root_path.join(relative)
}

/// App store joined with `relative`.
pub fn store_path(paths: &AppPathsConfig, relative: impl AsRef<Path>) -> PathBuf {
    paths.store_path.join(relative)
}
