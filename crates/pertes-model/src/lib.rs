//! Pertes Model
//!
//! The single entity of the catalog and its seed representation.
//!
//! # Core Types
//!
//! - [`Product`]: A named barcode with a stable id and a visibility flag
//! - [`ProductId`]: Opaque identifier generated once at creation
//! - [`SeedEntry`]: A `{name, barcode}` pair from the one-time seed import
//!
//! # Invariants
//!
//! - A product's id never changes after creation
//! - `search_key` is always `name` lowercased; only [`Product::rename`] changes the name
//!
//! # Example
//!
//! ```rust
//! use pertes_model::Product;
//!
//! let mut product = Product::new("Lait", "123");
//! assert_eq!(product.search_key(), "lait");
//!
//! product.rename("Lait Bio");
//! assert_eq!(product.search_key(), "lait bio");
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod product;

pub use product::{Product, ProductId, SeedEntry};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
