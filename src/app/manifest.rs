//! App manifest access.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

/// Errors from loading or reading the manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("manifest is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("manifest has no field '{0}'")]
    MissingField(String),
}

pub type ManifestResult<T> = Result<T, ManifestError>;

/// Read-only view of the app manifest.
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    json: Value,
}

impl Manifest {
    /// Load the manifest from a JSON file.
    pub fn load(path: &Path) -> ManifestResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let json = serde_json::from_str(&content)?;
        tracing::debug!(path = %path.display(), "Manifest loaded");
        Ok(Self { json })
    }

    pub fn from_value(json: Value) -> Self {
        Self { json }
    }

    /// The whole manifest document.
    pub fn json(&self) -> &Value {
        &self.json
    }

    /// Value of `key`, or [`ManifestError::MissingField`].
    pub fn field(&self, key: &str) -> ManifestResult<&Value> {
        self.json
            .get(key)
            .ok_or_else(|| ManifestError::MissingField(key.to_string()))
    }

    /// Value of `key`, or `default` when absent.
    pub fn field_or<'a>(&'a self, key: &str, default: &'a Value) -> &'a Value {
        self.json.get(key).unwrap_or(default)
    }

    /// Value of `key` as text. Strings are returned verbatim and numbers in
    /// decimal; any other type yields `None`.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.json.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// The `app_id` field, or 0 when absent or not numeric.
    pub fn app_id(&self) -> u64 {
        match self.json.get("app_id") {
            Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
            Some(Value::String(s)) => s.parse().unwrap_or(0),
            _ => 0,
        }
    }

    /// The `name` field.
    pub fn app_name(&self) -> ManifestResult<&str> {
        self.field("name")?
            .as_str()
            .ok_or_else(|| ManifestError::MissingField("name".to_string()))
    }
}
