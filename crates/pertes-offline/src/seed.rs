//! Seed served through the offline cache

use crate::cache::OfflineCache;
use crate::fetcher::Fetcher;
use async_trait::async_trait;
use pertes_model::SeedEntry;
use pertes_store::{parse_seed, SeedError, SeedSource};
use std::sync::Arc;

/// Seed fetched from the seed asset, cached copy first
#[derive(Debug)]
pub struct CachedSeed<F> {
    cache: Arc<OfflineCache<F>>,
    path: String,
}

impl<F: Fetcher> CachedSeed<F> {
    /// Seed at `path` served through `cache`
    #[inline]
    #[must_use]
    pub fn new(cache: Arc<OfflineCache<F>>, path: impl Into<String>) -> Self {
        Self {
            cache,
            path: path.into(),
        }
    }

    /// Asset path of the seed
    #[inline]
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }
}

#[async_trait]
impl<F: Fetcher> SeedSource for CachedSeed<F> {
    async fn fetch(&self) -> Result<Vec<SeedEntry>, SeedError> {
        let bytes = self
            .cache
            .fetch(&self.path)
            .await
            .map_err(|e| SeedError::fetch_error(self.path.as_str(), e))?;
        parse_seed(&bytes)
    }
}
