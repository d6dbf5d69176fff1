//! Pertes Offline
//!
//! Cache-first serving of the static assets the app needs without network,
//! including the seed file read on first launch.
//!
//! # Core Operations
//!
//! - **Install**: fetch the whole manifest into a new generation, all or nothing
//! - **Activate**: drop every other generation
//! - **Fetch**: cached copy if present, network otherwise
//!
//! # Example
//!
//! ```rust,ignore
//! use pertes_offline::{AssetManifest, CacheStorage, CachedSeed, DirFetcher, OfflineCache};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let cache = Arc::new(OfflineCache::new(
//!     DirFetcher::new("site"),
//!     AssetManifest::default(),
//!     CacheStorage::new(),
//! ));
//! cache.install().await?;
//! cache.activate();
//!
//! let seed = CachedSeed::new(cache, "/products.json");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod cache;
pub mod error;
pub mod fetcher;
pub mod manifest;
pub mod seed;

pub use cache::{CacheStorage, OfflineCache};
pub use error::{CacheError, FetchError};
pub use fetcher::{Asset, DirFetcher, Fetcher};
pub use manifest::{AssetManifest, ASSETS, CACHE_GENERATION};
pub use seed::CachedSeed;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
