//! Asset manifest

/// Cache generation tag of the current release
pub const CACHE_GENERATION: &str = "pertes-v1";

/// Static assets needed to run offline
pub const ASSETS: &[&str] = &[
    "/",
    "/index.html",
    "/style.css",
    "/manifest.json",
    "/products.json",
    "/jsbarcode.min.js",
    "/js/main.js",
    "/images/icon-192.png",
    "/images/icon-512.png",
];

/// Fixed list of assets under a generation tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetManifest {
    generation: String,
    assets: Vec<String>,
}

impl AssetManifest {
    /// Manifest with the release asset list under `generation`
    #[must_use]
    pub fn new(generation: impl Into<String>) -> Self {
        Self {
            generation: generation.into(),
            assets: ASSETS.iter().map(|a| (*a).to_string()).collect(),
        }
    }

    /// With a custom asset list
    #[inline]
    #[must_use]
    pub fn with_assets<I, A>(mut self, assets: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        self.assets = assets.into_iter().map(Into::into).collect();
        self
    }

    /// Generation tag
    #[inline]
    #[must_use]
    pub fn generation(&self) -> &str {
        &self.generation
    }

    /// Asset paths in order
    #[inline]
    #[must_use]
    pub fn assets(&self) -> &[String] {
        &self.assets
    }

    /// Whether `path` is part of the manifest
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.assets.iter().any(|a| a == path)
    }
}

impl Default for AssetManifest {
    fn default() -> Self {
        Self::new(CACHE_GENERATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_manifest_includes_seed_and_renderer() {
        let manifest = AssetManifest::default();
        assert_eq!(manifest.generation(), "pertes-v1");
        assert!(manifest.contains("/products.json"));
        assert!(manifest.contains("/jsbarcode.min.js"));
        assert_eq!(manifest.assets().len(), ASSETS.len());
    }

    #[test]
    fn custom_assets_replace_list() {
        let manifest = AssetManifest::new("test").with_assets(["/a", "/b"]);
        assert!(manifest.contains("/a"));
        assert!(!manifest.contains("/index.html"));
    }
}
