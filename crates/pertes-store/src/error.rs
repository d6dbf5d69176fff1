//! Error types for the catalog store
//!
//! Provides error handling for:
//! - Storage medium failures (read, write, remove)
//! - Seed fetch and decode failures
//! - Hydration and persistence outcomes surfaced to callers

use std::path::PathBuf;

/// Failures reported by a storage medium
#[derive(Debug, thiserror::Error)]
pub enum SlotError {
    /// The medium refused the write because it would exceed its quota
    #[error("quota exceeded: {needed} bytes needed, {quota} allowed")]
    QuotaExceeded {
        /// Size of the rejected write
        needed: usize,
        /// Bytes the medium accepts
        quota: usize,
    },

    /// IO error on the backing file
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The medium rejected the operation for another reason
    #[error("storage rejected operation: {0}")]
    Rejected(String),
}

impl SlotError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Failures while fetching or decoding the seed source
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    /// IO error reading the seed file
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Seed payload is not a list of `{name, barcode}` objects
    #[error("malformed seed: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Transport-level failure
    #[error("seed fetch failed for {path}: {source}")]
    Fetch {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl SeedError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create transport error for the seed at `path`, keeping the cause
    pub fn fetch_error(
        path: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Fetch {
            path: path.into(),
            source: source.into(),
        }
    }
}

/// Errors surfaced by [`CatalogStore`](crate::CatalogStore)
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Slot missing and the seed could not be fetched; no catalog exists
    #[error("seed source unavailable: {0}")]
    SeedUnavailable(#[source] SeedError),

    /// The storage medium rejected a write; memory is ahead of storage
    #[error("persistence unavailable: {0}")]
    PersistenceUnavailable(#[source] SlotError),

    /// The storage medium could not be read
    #[error("storage read failed: {0}")]
    ReadFailed(#[source] SlotError),

    /// Stored contents are not a product list
    #[error("stored catalog is corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),

    /// Product list could not be encoded
    #[error("failed to encode catalog: {0}")]
    Encode(#[source] serde_json::Error),
}

impl StoreError {
    /// Check if the error prevents any catalog from being shown
    #[inline]
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::SeedUnavailable(_) | Self::ReadFailed(_) | Self::Corrupt(_)
        )
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quota_error_display() {
        let err = SlotError::QuotaExceeded {
            needed: 120,
            quota: 100,
        };
        assert_eq!(err.to_string(), "quota exceeded: 120 bytes needed, 100 allowed");
    }

    #[test]
    fn seed_unavailable_is_fatal() {
        let err = StoreError::SeedUnavailable(SeedError::fetch_error("/products.json", "offline"));
        assert!(err.is_fatal());
        assert!(err.to_string().contains("offline"));
    }

    #[test]
    fn fetch_error_keeps_cause() {
        let cause = std::io::Error::from(std::io::ErrorKind::ConnectionRefused);
        let err = SeedError::fetch_error("/products.json", cause);

        let source = std::error::Error::source(&err).unwrap();
        assert!(source.downcast_ref::<std::io::Error>().is_some());
        assert!(err.to_string().contains("/products.json"));
    }

    #[test]
    fn persistence_failure_is_not_fatal() {
        let err = StoreError::PersistenceUnavailable(SlotError::Rejected("full".to_string()));
        assert!(!err.is_fatal());
    }
}
