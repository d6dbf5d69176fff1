//! Pertes Store
//!
//! The durable side of the catalog: one named storage slot holding the whole
//! product list, and a seed source consulted only while that slot is missing.
//!
//! # Core Operations
//!
//! - **Hydrate**: read the slot, or import the seed on first run
//! - **Persist**: overwrite the slot with the full list
//! - **Clear**: remove the slot (reset paths only)
//!
//! # Example
//!
//! ```rust,ignore
//! use pertes_store::{CatalogStore, FileSlot, JsonFileSeed};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut store = CatalogStore::new(FileSlot::new(".pertes", "products"));
//! let hydration = store.hydrate(&JsonFileSeed::new("products.json")).await?;
//! store.persist(hydration.products())?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod seed;
pub mod slot;
pub mod store;

pub use error::{SeedError, SlotError, StoreError, StoreResult};
pub use seed::{parse_seed, JsonFileSeed, SeedSource, StaticSeed};
pub use slot::{FileSlot, MemorySlot, StorageSlot};
pub use store::{CatalogStore, Hydration};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
