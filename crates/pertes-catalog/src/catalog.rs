//! The in-memory catalog and its mutating operations
//!
//! [`Catalog`] is the only owner of the product list. Every operation takes
//! `&mut self`, mutates the list in place and persists the full list before
//! returning, so no caller can observe a half-applied step.

use crate::config::PersistPolicy;
use pertes_model::{Product, ProductId};
use pertes_store::{CatalogStore, SeedSource, StorageSlot, StoreResult};

/// Single-writer product catalog
///
/// Lookup misses (stale ids) are silent no-ops and do not touch storage.
/// The caller is responsible for validating input before calling
/// [`Catalog::add_product`], including the duplicate barcode check.
#[derive(Debug)]
pub struct Catalog<S> {
    products: Vec<Product>,
    store: CatalogStore<S>,
    policy: PersistPolicy,
    dirty: bool,
}

impl<S: StorageSlot> Catalog<S> {
    /// Create catalog over an already hydrated list
    #[inline]
    #[must_use]
    pub fn new(store: CatalogStore<S>, products: Vec<Product>) -> Self {
        Self {
            products,
            store,
            policy: PersistPolicy::default(),
            dirty: false,
        }
    }

    /// Hydrate the store and wrap the result
    ///
    /// A seeded catalog whose first write was rejected starts dirty.
    ///
    /// # Errors
    /// Propagates fatal hydration errors (`SeedUnavailable`, `ReadFailed`, `Corrupt`)
    pub async fn open<Src>(mut store: CatalogStore<S>, seed: &Src) -> StoreResult<Self>
    where
        Src: SeedSource + ?Sized,
    {
        let hydration = store.hydrate(seed).await?;
        let dirty = !hydration.is_persisted();
        Ok(Self {
            products: hydration.into_products(),
            store,
            policy: PersistPolicy::default(),
            dirty,
        })
    }

    /// With persist policy
    #[inline]
    #[must_use]
    pub fn with_policy(mut self, policy: PersistPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Products in insertion order
    #[inline]
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up product by id
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id() == id)
    }

    /// Number of products
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Whether memory holds changes that storage rejected
    #[inline]
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Append a new visible product
    ///
    /// Both inputs are trimmed. Returns the generated id.
    ///
    /// # Errors
    /// Returns `StoreError::PersistenceUnavailable` if the write is rejected
    pub fn add_product(&mut self, name: &str, barcode: &str) -> StoreResult<ProductId> {
        let product = Product::new(name.trim(), barcode.trim());
        let id = product.id().clone();
        tracing::debug!(%id, name = product.name(), "adding product");

        self.mutate(|products| {
            products.push(product);
            Some(())
        })?;
        Ok(id)
    }

    /// Overwrite name (and search key) and barcode of an existing product
    ///
    /// Id and visibility are untouched. The barcode is not checked for
    /// duplicates here.
    ///
    /// # Errors
    /// Returns `StoreError::PersistenceUnavailable` if the write is rejected
    pub fn rename_or_recode(&mut self, id: &ProductId, name: &str, barcode: &str) -> StoreResult<()> {
        tracing::debug!(%id, name, barcode, "updating product");
        self.mutate(|products| {
            let product = products.iter_mut().find(|p| p.id() == id)?;
            product.rename(name);
            product.recode(barcode);
            Some(())
        })
        .map(drop)
    }

    /// Flip the visibility flag
    ///
    /// # Errors
    /// Returns `StoreError::PersistenceUnavailable` if the write is rejected
    pub fn toggle_visibility(&mut self, id: &ProductId) -> StoreResult<()> {
        let visible = self.mutate(|products| {
            products
                .iter_mut()
                .find(|p| p.id() == id)
                .map(Product::toggle_visibility)
        })?;
        if let Some(visible) = visible {
            tracing::debug!(%id, visible, "visibility toggled");
        }
        Ok(())
    }

    /// Remove a product; deleting an absent id does nothing
    ///
    /// # Errors
    /// Returns `StoreError::PersistenceUnavailable` if the write is rejected
    pub fn delete_product(&mut self, id: &ProductId) -> StoreResult<()> {
        let removed = self.mutate(|products| {
            let index = products.iter().position(|p| p.id() == id)?;
            Some(products.remove(index))
        })?;
        if let Some(product) = removed {
            tracing::debug!(%id, name = product.name(), "product deleted");
        }
        Ok(())
    }

    /// Retry persisting the current list
    ///
    /// # Errors
    /// Returns `StoreError::PersistenceUnavailable` if the write is still rejected
    pub fn flush(&mut self) -> StoreResult<()> {
        self.store.persist(&self.products)?;
        self.dirty = false;
        Ok(())
    }

    /// Apply `op` and persist; `op` returning `None` means nothing matched
    fn mutate<T>(
        &mut self,
        op: impl FnOnce(&mut Vec<Product>) -> Option<T>,
    ) -> StoreResult<Option<T>> {
        let snapshot = match self.policy {
            PersistPolicy::Rollback => Some(self.products.clone()),
            PersistPolicy::KeepAhead => None,
        };

        let Some(out) = op(&mut self.products) else {
            return Ok(None);
        };

        match self.store.persist(&self.products) {
            Ok(()) => {
                self.dirty = false;
                Ok(Some(out))
            }
            Err(e) => {
                if let Some(previous) = snapshot {
                    self.products = previous;
                    tracing::warn!(error = %e, "persist rejected, mutation rolled back");
                } else {
                    self.dirty = true;
                    tracing::warn!(error = %e, "persist rejected, memory ahead of storage");
                }
                Err(e)
            }
        }
    }
}
