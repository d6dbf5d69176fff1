//! Catalog store - hydration and whole-list persistence
//!
//! Hydration has two terminal outcomes:
//!
//! ```text
//! slot written ────────────────────────────────▶ FromStorage
//! slot missing ──▶ seed.fetch() ──▶ synthesize ──▶ persist ──▶ FromSeed
//!                     │
//!                     └── error ──▶ SeedUnavailable
//! ```
//!
//! Once a seeded catalog has been persisted the slot exists, so the seed is
//! never consulted again, even after every product has been deleted.

use crate::error::{StoreError, StoreResult};
use crate::seed::SeedSource;
use crate::slot::StorageSlot;
use pertes_model::Product;

/// Outcome of [`CatalogStore::hydrate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hydration {
    /// Stored list returned verbatim
    FromStorage(Vec<Product>),
    /// Seed imported; `persisted` is false if the first write was rejected
    FromSeed {
        /// Products built from the seed entries
        products: Vec<Product>,
        /// Whether the seeded list reached storage
        persisted: bool,
    },
}

impl Hydration {
    /// Hydrated products in stored order
    #[inline]
    #[must_use]
    pub fn products(&self) -> &[Product] {
        match self {
            Self::FromStorage(products) | Self::FromSeed { products, .. } => products,
        }
    }

    /// Take the hydrated products
    #[inline]
    #[must_use]
    pub fn into_products(self) -> Vec<Product> {
        match self {
            Self::FromStorage(products) | Self::FromSeed { products, .. } => products,
        }
    }

    /// Whether the seed was imported
    #[inline]
    #[must_use]
    pub fn is_from_seed(&self) -> bool {
        matches!(self, Self::FromSeed { .. })
    }

    /// Whether durable storage holds exactly these products
    #[inline]
    #[must_use]
    pub fn is_persisted(&self) -> bool {
        match self {
            Self::FromStorage(_) => true,
            Self::FromSeed { persisted, .. } => *persisted,
        }
    }
}

/// Owner of the durable slot
///
/// The store never holds products itself; it reads and writes whole lists.
#[derive(Debug, Clone)]
pub struct CatalogStore<S> {
    slot: S,
}

impl<S: StorageSlot> CatalogStore<S> {
    /// Create store over slot
    #[inline]
    #[must_use]
    pub fn new(slot: S) -> Self {
        Self { slot }
    }

    /// Borrow the underlying slot
    #[inline]
    #[must_use]
    pub fn slot(&self) -> &S {
        &self.slot
    }

    /// Read the stored list, `None` only when the slot is missing
    ///
    /// A stored empty list is a catalog whose products were all deleted and
    /// is returned as such.
    ///
    /// # Errors
    /// - `StoreError::ReadFailed` if the slot cannot be read
    /// - `StoreError::Corrupt` if the contents are not a product list
    pub fn load(&self) -> StoreResult<Option<Vec<Product>>> {
        let Some(raw) = self.slot.read().map_err(StoreError::ReadFailed)? else {
            return Ok(None);
        };

        let products: Vec<Product> = serde_json::from_str(&raw).map_err(StoreError::Corrupt)?;

        let stale = products.iter().filter(|p| !p.is_consistent()).count();
        if stale > 0 {
            tracing::warn!(
                slot = self.slot.name(),
                stale,
                "stored search keys differ from lowercased names"
            );
        }

        Ok(Some(products))
    }

    /// Load the catalog, importing the seed if the slot was never written
    ///
    /// Stored ids and search keys are trusted. Seeded products get a fresh id,
    /// `visible = true` and a derived search key, and are persisted before
    /// returning. A rejected first write is logged and reported through
    /// [`Hydration::is_persisted`] rather than failing hydration.
    ///
    /// # Errors
    /// - `StoreError::SeedUnavailable` if the slot is missing and the seed fetch fails
    /// - `StoreError::ReadFailed` / `StoreError::Corrupt` if the slot cannot be loaded
    pub async fn hydrate<Src>(&mut self, seed: &Src) -> StoreResult<Hydration>
    where
        Src: SeedSource + ?Sized,
    {
        if let Some(products) = self.load()? {
            tracing::info!(
                slot = self.slot.name(),
                count = products.len(),
                "catalog hydrated from storage"
            );
            return Ok(Hydration::FromStorage(products));
        }

        let entries = seed.fetch().await.map_err(StoreError::SeedUnavailable)?;
        let products: Vec<Product> = entries.into_iter().map(Product::from_seed).collect();

        let persisted = match self.persist(&products) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(slot = self.slot.name(), error = %e, "seeded catalog not persisted");
                false
            }
        };

        tracing::info!(
            slot = self.slot.name(),
            count = products.len(),
            persisted,
            "catalog hydrated from seed"
        );
        Ok(Hydration::FromSeed {
            products,
            persisted,
        })
    }

    /// Serialize the full list and overwrite the slot
    ///
    /// # Errors
    /// - `StoreError::PersistenceUnavailable` if the medium rejects the write
    /// - `StoreError::Encode` if the list cannot be serialized
    pub fn persist(&mut self, products: &[Product]) -> StoreResult<()> {
        let encoded = serde_json::to_string(products).map_err(StoreError::Encode)?;
        self.slot
            .write(&encoded)
            .map_err(StoreError::PersistenceUnavailable)?;
        tracing::debug!(slot = self.slot.name(), count = products.len(), "catalog persisted");
        Ok(())
    }

    /// Remove the durable slot
    ///
    /// # Errors
    /// Returns `StoreError::PersistenceUnavailable` if the medium rejects the removal
    pub fn clear(&mut self) -> StoreResult<()> {
        self.slot
            .remove()
            .map_err(StoreError::PersistenceUnavailable)?;
        tracing::info!(slot = self.slot.name(), "catalog slot cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::StaticSeed;
    use crate::slot::MemorySlot;
    use pertes_model::SeedEntry;

    fn lait_seed() -> StaticSeed {
        StaticSeed::new(vec![SeedEntry::new("Lait", "123")])
    }

    #[tokio::test]
    async fn empty_slot_imports_seed() {
        let slot = MemorySlot::new("products");
        let mut store = CatalogStore::new(slot.clone());

        let hydration = store.hydrate(&lait_seed()).await.unwrap();

        assert!(hydration.is_from_seed());
        assert!(hydration.is_persisted());
        let product = &hydration.products()[0];
        assert_eq!(product.name(), "Lait");
        assert_eq!(product.search_key(), "lait");
        assert!(product.is_visible());
        assert!(slot.contents().unwrap().contains("\"searchName\":\"lait\""));
    }

    #[tokio::test]
    async fn stored_empty_list_is_not_reseeded() {
        let slot = MemorySlot::with_contents("products", "[]");
        let mut store = CatalogStore::new(slot);

        let hydration = store.hydrate(&lait_seed()).await.unwrap();
        assert_eq!(hydration, Hydration::FromStorage(Vec::new()));
    }

    #[tokio::test]
    async fn corrupt_slot_is_fatal() {
        let slot = MemorySlot::with_contents("products", "{not json");
        let mut store = CatalogStore::new(slot);

        let err = store.hydrate(&lait_seed()).await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupt(_)));
        assert!(err.is_fatal());
    }

    #[tokio::test]
    async fn rejected_seed_write_still_hydrates() {
        let slot = MemorySlot::new("products").with_quota(1);
        let mut store = CatalogStore::new(slot.clone());

        let hydration = store.hydrate(&lait_seed()).await.unwrap();

        assert!(hydration.is_from_seed());
        assert!(!hydration.is_persisted());
        assert_eq!(hydration.products().len(), 1);
        assert_eq!(slot.contents(), None);
    }

    #[test]
    fn clear_removes_slot() {
        let slot = MemorySlot::with_contents("products", "[]");
        let mut store = CatalogStore::new(slot.clone());

        store.clear().unwrap();
        assert_eq!(slot.contents(), None);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn product() -> impl Strategy<Value = Product> {
            ("\\PC{0,12}", "[0-9A-Z]{1,13}", any::<bool>()).prop_map(|(name, barcode, visible)| {
                let mut product = Product::new(name, barcode);
                product.set_visible(visible);
                product
            })
        }

        proptest! {
            #[test]
            fn persisted_list_loads_back_unchanged(
                products in proptest::collection::vec(product(), 0..8),
            ) {
                let mut store = CatalogStore::new(MemorySlot::new("products"));

                store.persist(&products).unwrap();

                prop_assert_eq!(store.load().unwrap(), Some(products));
            }
        }
    }
}
