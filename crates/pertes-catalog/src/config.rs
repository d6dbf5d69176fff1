//! Catalog configuration
//!
//! Loaded from TOML; every key is optional and falls back to [`Default`].
//!
//! ```toml
//! data_dir = ".pertes"
//! slot_name = "products"
//! asset_root = "."
//! seed_path = "/products.json"
//! cache_generation = "pertes-v1"
//! persist_policy = "keep-ahead"   # or "rollback"
//! notice_ttl_ms = 3000
//!
//! [render]
//! width = 2
//! height = 60
//! detail_height = 200
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// What happens to memory when a persist is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PersistPolicy {
    /// Keep the mutation; memory stays ahead of storage until a later persist succeeds
    #[default]
    KeepAhead,
    /// Restore the list as it was before the mutation
    Rollback,
}

/// Barcode render dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Bar module width
    pub width: u32,
    /// Symbol height in list items
    pub height: u32,
    /// Symbol height in the detail overlay
    pub detail_height: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 2,
            height: 60,
            detail_height: 200,
        }
    }
}

/// Catalog configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Directory holding the storage slot
    pub data_dir: PathBuf,
    /// Storage slot name
    pub slot_name: String,
    /// Directory the static assets are served from
    pub asset_root: PathBuf,
    /// Manifest path of the seed file
    pub seed_path: String,
    /// Offline cache generation tag
    pub cache_generation: String,
    /// Policy on rejected persists
    pub persist_policy: PersistPolicy,
    /// How long notices stay up
    pub notice_ttl_ms: u64,
    /// Barcode render dimensions
    pub render: RenderConfig,
}

impl CatalogConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file; a missing file yields defaults
    ///
    /// # Errors
    /// - `ConfigError::Io` if the file exists but cannot be read
    /// - `ConfigError::Parse` if the contents are not valid configuration
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml_str(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    /// Returns `ConfigError::Parse` if the text is not valid configuration
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// With data directory
    #[inline]
    #[must_use]
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// With asset root
    #[inline]
    #[must_use]
    pub fn with_asset_root(mut self, dir: impl Into<PathBuf>) -> Self {
        self.asset_root = dir.into();
        self
    }

    /// With persist policy
    #[inline]
    #[must_use]
    pub fn with_persist_policy(mut self, policy: PersistPolicy) -> Self {
        self.persist_policy = policy;
        self
    }

    /// Notice display duration
    #[inline]
    #[must_use]
    pub fn notice_ttl(&self) -> Duration {
        Duration::from_millis(self.notice_ttl_ms)
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".pertes"),
            slot_name: "products".to_string(),
            asset_root: PathBuf::from("."),
            seed_path: "/products.json".to_string(),
            cache_generation: "pertes-v1".to_string(),
            persist_policy: PersistPolicy::KeepAhead,
            notice_ttl_ms: 3000,
            render: RenderConfig::default(),
        }
    }
}
