//! Testing utilities for the Pertes workspace
//!
//! Fake seed sources and storage slots, plus product fixtures.

#![allow(missing_docs)]

use async_trait::async_trait;
use pertes_model::{Product, SeedEntry};
use pertes_store::{CatalogStore, MemorySlot, SeedError, SeedSource, SlotError, StorageSlot};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// Seed that counts how often it was fetched
#[derive(Debug, Clone, Default)]
pub struct RecordingSeed {
    entries: Vec<SeedEntry>,
    fetches: Arc<AtomicUsize>,
}

impl RecordingSeed {
    pub fn new(entries: Vec<SeedEntry>) -> Self {
        Self {
            entries,
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SeedSource for RecordingSeed {
    async fn fetch(&self) -> Result<Vec<SeedEntry>, SeedError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.entries.clone())
    }
}

/// Seed whose fetch always fails, like a first load without network
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableSeed;

#[async_trait]
impl SeedSource for UnavailableSeed {
    async fn fetch(&self) -> Result<Vec<SeedEntry>, SeedError> {
        Err(SeedError::fetch_error(
            "/products.json",
            std::io::Error::from(std::io::ErrorKind::ConnectionRefused),
        ))
    }
}

/// Slot that reads through to a memory slot but can be told to reject writes
#[derive(Debug, Clone)]
pub struct RejectingSlot {
    inner: MemorySlot,
    rejecting: Arc<AtomicBool>,
}

impl RejectingSlot {
    pub fn new(inner: MemorySlot) -> Self {
        Self {
            inner,
            rejecting: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Start or stop rejecting writes; shared by all clones
    pub fn set_rejecting(&self, rejecting: bool) {
        self.rejecting.store(rejecting, Ordering::SeqCst);
    }

    pub fn inner(&self) -> &MemorySlot {
        &self.inner
    }
}

impl StorageSlot for RejectingSlot {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn read(&self) -> Result<Option<String>, SlotError> {
        self.inner.read()
    }

    fn write(&mut self, contents: &str) -> Result<(), SlotError> {
        if self.rejecting.load(Ordering::SeqCst) {
            return Err(SlotError::Rejected("quota exceeded".to_string()));
        }
        self.inner.write(contents)
    }

    fn remove(&mut self) -> Result<(), SlotError> {
        self.inner.remove()
    }
}

pub fn lait_seed() -> Vec<SeedEntry> {
    vec![SeedEntry::new("Lait", "123")]
}

pub fn sample_entries() -> Vec<SeedEntry> {
    vec![
        SeedEntry::new("Lait", "123"),
        SeedEntry::new("beurre", "456"),
        SeedEntry::new("Éclair", "789"),
        SeedEntry::new("Crème fraîche", "321"),
        SeedEntry::new("Yaourt", "654"),
    ]
}

pub fn sample_products() -> Vec<Product> {
    sample_entries().into_iter().map(Product::from_seed).collect()
}

/// Memory slot already holding `products`, as if persisted by an earlier session
pub fn slot_with(products: &[Product]) -> MemorySlot {
    let slot = MemorySlot::new("products");
    CatalogStore::new(slot.clone()).persist(products).unwrap();
    slot
}
