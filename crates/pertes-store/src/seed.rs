//! Seed sources
//!
//! The seed is a static ordered list of `{name, barcode}` pairs consulted only
//! when the durable slot has never been written.

use crate::error::SeedError;
use async_trait::async_trait;
use pertes_model::SeedEntry;
use std::path::{Path, PathBuf};

/// Provider of the one-time seed import
#[async_trait]
pub trait SeedSource: Send + Sync {
    /// Fetch the seed entries in order
    ///
    /// # Errors
    /// Returns error if the seed cannot be fetched or decoded
    async fn fetch(&self) -> Result<Vec<SeedEntry>, SeedError>;
}

/// Decode a seed payload (a JSON array of `{name, barcode}` objects)
///
/// # Errors
/// Returns [`SeedError::Malformed`] if the payload is not such an array
pub fn parse_seed(bytes: &[u8]) -> Result<Vec<SeedEntry>, SeedError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Seed read from a JSON file on disk
#[derive(Debug, Clone)]
pub struct JsonFileSeed {
    path: PathBuf,
}

impl JsonFileSeed {
    /// Create seed source for file
    #[inline]
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Seed file path
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SeedSource for JsonFileSeed {
    async fn fetch(&self) -> Result<Vec<SeedEntry>, SeedError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| SeedError::io_error(&self.path, e))?;
        parse_seed(&bytes)
    }
}

/// Seed held in memory
#[derive(Debug, Clone, Default)]
pub struct StaticSeed {
    entries: Vec<SeedEntry>,
}

impl StaticSeed {
    /// Create seed from entries
    #[inline]
    #[must_use]
    pub fn new(entries: Vec<SeedEntry>) -> Self {
        Self { entries }
    }
}

#[async_trait]
impl SeedSource for StaticSeed {
    async fn fetch(&self) -> Result<Vec<SeedEntry>, SeedError> {
        Ok(self.entries.clone())
    }
}
