//! Error types for the offline cache

use std::path::PathBuf;

/// Errors fetching an asset from the network side
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Nothing served at this path
    #[error("asset not found: {0}")]
    NotFound(String),

    /// Path escapes the asset root
    #[error("asset path outside root: {0}")]
    OutsideRoot(String),

    /// IO error while reading the asset
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    /// Create IO error for path, mapping a missing file to [`FetchError::NotFound`]
    pub fn io_error(request: &str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            return Self::NotFound(request.to_string());
        }
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors managing cache generations
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// An asset of the manifest could not be fetched; nothing was installed
    #[error("install of {generation} failed on {path}: {source}")]
    Install {
        generation: String,
        path: String,
        #[source]
        source: FetchError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_not_found() {
        let err = FetchError::io_error(
            "/style.css",
            "site/style.css",
            std::io::Error::from(std::io::ErrorKind::NotFound),
        );
        assert!(matches!(err, FetchError::NotFound(ref p) if p == "/style.css"));
    }

    #[test]
    fn install_error_names_asset() {
        let err = CacheError::Install {
            generation: "pertes-v1".to_string(),
            path: "/manifest.json".to_string(),
            source: FetchError::NotFound("/manifest.json".to_string()),
        };
        let message = err.to_string();
        assert!(message.contains("pertes-v1"));
        assert!(message.contains("/manifest.json"));
    }
}
