//! Network side of the offline cache

use crate::error::FetchError;
use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// Asset body
pub type Asset = Arc<[u8]>;

/// Source of assets when the cache has no copy
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch the asset served at `path`
    ///
    /// # Errors
    /// Returns error if the asset is unreachable or missing
    async fn fetch(&self, path: &str) -> Result<Asset, FetchError>;
}

#[async_trait]
impl<F: Fetcher + ?Sized> Fetcher for Arc<F> {
    async fn fetch(&self, path: &str) -> Result<Asset, FetchError> {
        (**self).fetch(path).await
    }
}

/// Serves assets from a directory, `/` mapping to `index.html`
#[derive(Debug, Clone)]
pub struct DirFetcher {
    root: PathBuf,
}

impl DirFetcher {
    /// Create fetcher rooted at `root`
    #[inline]
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Asset root
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File path for a request path
    ///
    /// # Errors
    /// Returns [`FetchError::OutsideRoot`] for paths with `..` or a prefix
    pub fn resolve(&self, path: &str) -> Result<PathBuf, FetchError> {
        let relative = path.trim_start_matches('/');
        let relative = if relative.is_empty() {
            "index.html"
        } else {
            relative
        };

        let relative = Path::new(relative);
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(FetchError::OutsideRoot(path.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl Fetcher for DirFetcher {
    async fn fetch(&self, path: &str) -> Result<Asset, FetchError> {
        let file = self.resolve(path)?;
        let bytes = tokio::fs::read(&file)
            .await
            .map_err(|e| FetchError::io_error(path, &file, e))?;
        tracing::trace!(path, bytes = bytes.len(), "asset read from disk");
        Ok(Asset::from(bytes))
    }
}
