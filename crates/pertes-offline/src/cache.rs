//! Generation-tagged asset cache using moka
//!
//! Assets of one release live in one cache named by its generation tag.
//! Several generations can coexist in [`CacheStorage`] until the newest one
//! is activated, which drops every other generation.
//!
//! Lifecycle of an [`OfflineCache`]:
//!
//! 1. **install**: fetch every manifest asset; either all are stored or none
//! 2. **activate**: delete caches whose tag differs from the current one
//! 3. **fetch**: serve a cached copy when one exists, otherwise the network
//!
//! The cache never touches catalog data.

use crate::error::{CacheError, FetchError};
use crate::fetcher::{Asset, Fetcher};
use crate::manifest::AssetManifest;
use dashmap::DashMap;
use futures::future::try_join_all;
use moka::future::Cache;
use std::sync::Arc;

/// All cached generations, shared between successive releases
#[derive(Debug, Clone, Default)]
pub struct CacheStorage {
    caches: Arc<DashMap<String, Cache<String, Asset>>>,
}

impl CacheStorage {
    /// Create empty storage
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored generation tags, sorted
    #[must_use]
    pub fn generations(&self) -> Vec<String> {
        let mut tags: Vec<String> = self.caches.iter().map(|e| e.key().clone()).collect();
        tags.sort();
        tags
    }

    /// Whether a generation is stored
    #[inline]
    #[must_use]
    pub fn has_generation(&self, generation: &str) -> bool {
        self.caches.contains_key(generation)
    }

    /// Cached copy of `path`, searching `preferred` first
    ///
    /// Other generations are searched in tag order, so the result does not
    /// depend on map iteration order.
    pub async fn lookup(&self, preferred: &str, path: &str) -> Option<Asset> {
        let mut order = vec![preferred.to_string()];
        order.extend(self.generations().into_iter().filter(|g| g != preferred));

        for generation in order {
            let cache = match self.caches.get(&generation) {
                Some(entry) => entry.value().clone(),
                None => continue,
            };
            if let Some(asset) = cache.get(path).await {
                return Some(asset);
            }
        }
        None
    }

    /// Delete a generation; returns whether it existed
    pub fn delete(&self, generation: &str) -> bool {
        self.caches.remove(generation).is_some()
    }

    fn put(&self, generation: &str, cache: Cache<String, Asset>) {
        self.caches.insert(generation.to_string(), cache);
    }
}

/// Offline cache for one release
#[derive(Debug)]
pub struct OfflineCache<F> {
    fetcher: F,
    manifest: AssetManifest,
    storage: CacheStorage,
}

impl<F: Fetcher> OfflineCache<F> {
    /// Create cache over `storage` for `manifest`
    #[inline]
    #[must_use]
    pub fn new(fetcher: F, manifest: AssetManifest, storage: CacheStorage) -> Self {
        Self {
            fetcher,
            manifest,
            storage,
        }
    }

    /// Manifest of this release
    #[inline]
    #[must_use]
    pub fn manifest(&self) -> &AssetManifest {
        &self.manifest
    }

    /// Shared storage
    #[inline]
    #[must_use]
    pub fn storage(&self) -> &CacheStorage {
        &self.storage
    }

    /// Fetch and store every manifest asset under the current generation
    ///
    /// Nothing is stored unless every asset was fetched.
    ///
    /// # Errors
    /// Returns [`CacheError::Install`] naming the first asset that failed
    pub async fn install(&self) -> Result<(), CacheError> {
        let generation = self.manifest.generation();
        let assets = self.manifest.assets();
        tracing::info!(generation, assets = assets.len(), "installing asset cache");

        let fetched = try_join_all(assets.iter().map(|path| async move {
            self.fetcher
                .fetch(path)
                .await
                .map(|asset| (path.clone(), asset))
                .map_err(|source| CacheError::Install {
                    generation: generation.to_string(),
                    path: path.clone(),
                    source,
                })
        }))
        .await;
        let fetched = match fetched {
            Ok(fetched) => fetched,
            Err(e) => {
                tracing::warn!(error = %e, "install aborted");
                return Err(e);
            }
        };

        let capacity = u64::try_from(fetched.len()).unwrap_or(u64::MAX);
        let cache = Cache::new(capacity.max(1));
        for (path, asset) in fetched {
            cache.insert(path, asset).await;
        }
        self.storage.put(generation, cache);
        Ok(())
    }

    /// Drop every generation other than the current one
    ///
    /// Returns the deleted generation tags.
    pub fn activate(&self) -> Vec<String> {
        let current = self.manifest.generation();
        let stale: Vec<String> = self
            .storage
            .generations()
            .into_iter()
            .filter(|g| g != current)
            .collect();

        for generation in &stale {
            self.storage.delete(generation);
            tracing::info!(generation, "deleted stale asset cache");
        }
        stale
    }

    /// Serve `path` from cache, falling back to the network
    ///
    /// The current generation wins over older ones still stored.
    /// Network responses are passed through without being stored.
    ///
    /// # Errors
    /// Returns the fetch error if the asset is neither cached nor reachable
    pub async fn fetch(&self, path: &str) -> Result<Asset, FetchError> {
        let generation = self.manifest.generation();
        if let Some(asset) = self.storage.lookup(generation, path).await {
            tracing::trace!(path, "served from cache");
            return Ok(asset);
        }
        tracing::debug!(path, "cache miss, fetching");
        self.fetcher.fetch(path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// Network stand-in with a fixed set of assets
    #[derive(Default)]
    struct FakeNetwork {
        assets: HashMap<String, Asset>,
        offline: AtomicBool,
        requests: AtomicUsize,
    }

    impl FakeNetwork {
        fn serving(paths: &[&str]) -> Self {
            Self {
                assets: paths
                    .iter()
                    .map(|p| ((*p).to_string(), Asset::from(p.as_bytes())))
                    .collect(),
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl Fetcher for FakeNetwork {
        async fn fetch(&self, path: &str) -> Result<Asset, FetchError> {
            self.requests.fetch_add(1, Ordering::SeqCst);
            if self.offline.load(Ordering::SeqCst) {
                return Err(FetchError::NotFound(path.to_string()));
            }
            self.assets
                .get(path)
                .cloned()
                .ok_or_else(|| FetchError::NotFound(path.to_string()))
        }
    }

    fn manifest(generation: &str) -> AssetManifest {
        AssetManifest::new(generation).with_assets(["/", "/style.css"])
    }

    #[tokio::test]
    async fn installed_assets_survive_going_offline() {
        let network = Arc::new(FakeNetwork::serving(&["/", "/style.css"]));
        let cache = OfflineCache::new(network.clone(), manifest("v1"), CacheStorage::new());

        cache.install().await.unwrap();
        network.offline.store(true, Ordering::SeqCst);

        assert_eq!(&cache.fetch("/style.css").await.unwrap()[..], b"/style.css");
        assert!(cache.fetch("/other.js").await.is_err());
    }

    #[tokio::test]
    async fn install_is_all_or_nothing() {
        let network = FakeNetwork::serving(&["/"]);
        let storage = CacheStorage::new();
        let cache = OfflineCache::new(network, manifest("v1"), storage.clone());

        let err = cache.install().await.unwrap_err();

        assert!(matches!(err, CacheError::Install { ref path, .. } if path == "/style.css"));
        assert!(!storage.has_generation("v1"));
    }

    #[tokio::test]
    async fn activate_purges_other_generations() {
        let network = Arc::new(FakeNetwork::serving(&["/", "/style.css"]));
        let storage = CacheStorage::new();
        let old = OfflineCache::new(network.clone(), manifest("v0"), storage.clone());
        let new = OfflineCache::new(network, manifest("v1"), storage.clone());

        old.install().await.unwrap();
        new.install().await.unwrap();
        assert_eq!(storage.generations(), ["v0", "v1"]);

        assert_eq!(new.activate(), ["v0"]);
        assert_eq!(storage.generations(), ["v1"]);
        assert!(new.activate().is_empty());
    }

    #[tokio::test]
    async fn current_generation_wins_before_activation() {
        let storage = CacheStorage::new();
        let mut old_site = FakeNetwork::serving(&["/", "/style.css"]);
        old_site
            .assets
            .insert("/style.css".to_string(), Asset::from(&b"old"[..]));
        let mut new_site = FakeNetwork::serving(&["/", "/style.css"]);
        new_site
            .assets
            .insert("/style.css".to_string(), Asset::from(&b"new"[..]));

        // "v10" sorts before "v2"; each release must still see its own copy
        let old = OfflineCache::new(old_site, manifest("v2"), storage.clone());
        let new = OfflineCache::new(new_site, manifest("v10"), storage.clone());
        old.install().await.unwrap();
        new.install().await.unwrap();

        assert_eq!(&new.fetch("/style.css").await.unwrap()[..], b"new");
        assert_eq!(&old.fetch("/style.css").await.unwrap()[..], b"old");
    }

    #[tokio::test]
    async fn miss_goes_to_network_without_storing() {
        let network = Arc::new(FakeNetwork::serving(&["/", "/style.css", "/late.js"]));
        let cache = OfflineCache::new(network.clone(), manifest("v1"), CacheStorage::new());
        cache.install().await.unwrap();
        let after_install = network.requests.load(Ordering::SeqCst);

        cache.fetch("/late.js").await.unwrap();
        cache.fetch("/late.js").await.unwrap();

        assert_eq!(network.requests.load(Ordering::SeqCst), after_install + 2);
    }
}
