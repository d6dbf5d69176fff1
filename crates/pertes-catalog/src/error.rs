//! Error types for catalog operations
//!
//! Provides error handling for:
//! - Form validation at the caller boundary (empty fields, duplicate barcode)
//! - Store failures surfaced during operations
//! - Configuration loading

use pertes_store::StoreError;
use std::path::PathBuf;

/// Form field a validation error points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Product name input
    Name,
    /// Barcode input
    Barcode,
}

/// User input rejected before any mutation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Name empty after trimming
    #[error("product name is required")]
    EmptyName,

    /// Barcode empty after trimming
    #[error("barcode is required")]
    EmptyBarcode,

    /// Another product already uses this barcode (checked on add only)
    #[error("barcode already exists: {0}")]
    DuplicateBarcode(String),
}

impl ValidationError {
    /// Field to flag in the form
    #[inline]
    #[must_use]
    pub fn field(&self) -> Field {
        match self {
            Self::EmptyName => Field::Name,
            Self::EmptyBarcode | Self::DuplicateBarcode(_) => Field::Barcode,
        }
    }

    /// Short message shown to the user
    #[inline]
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::EmptyName => "Le nom du produit est requis",
            Self::EmptyBarcode => "Le code-barres est requis",
            Self::DuplicateBarcode(_) => "Ce code-barres existe déjà!",
        }
    }
}

/// Combined catalog error
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Form input was rejected
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Storage or seed failure
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl CatalogError {
    /// Short message shown to the user
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Validation(e) => e.user_message(),
            Self::Store(StoreError::PersistenceUnavailable(_) | StoreError::Encode(_)) => {
                "Impossible d'enregistrer les produits"
            }
            Self::Store(_) => "Impossible de charger les produits",
        }
    }
}

/// Errors while loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading the config file
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`CatalogConfig`](crate::CatalogConfig)
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type alias for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;
