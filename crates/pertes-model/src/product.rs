//! Product records
//!
//! The stored form keeps the field names of the durable slot
//! (`name`, `barcode`, `id`, `visible`, `searchName`) so that an existing
//! catalog deserializes verbatim.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use uuid::Uuid;

/// Opaque product identifier
///
/// Generated once when a product is created and used as the only key for
/// lookup, update and delete. Stored ids are trusted as-is on hydration.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Generate a fresh random id (UUID v4)
    #[inline]
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wrap an existing id, e.g. one read back from storage or typed by a user
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// One entry of the seed source
///
/// Extra fields in the seed file are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedEntry {
    /// Display name
    pub name: String,
    /// Barcode payload
    pub barcode: String,
}

impl SeedEntry {
    /// Create seed entry
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, barcode: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            barcode: barcode.into(),
        }
    }
}

/// A catalog product
///
/// Products are mutated in place (never replaced wholesale) so the id and
/// visibility survive a rename or recode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    name: String,
    barcode: String,
    id: ProductId,
    visible: bool,
    #[serde(rename = "searchName", alias = "searchKey")]
    search_key: String,
}

impl Product {
    /// Create a visible product with a freshly generated id
    ///
    /// Inputs are taken as given; trimming belongs to the caller.
    #[must_use]
    pub fn new(name: impl Into<String>, barcode: impl Into<String>) -> Self {
        Self::with_id(ProductId::generate(), name, barcode)
    }

    /// Create a visible product with a known id
    #[must_use]
    pub fn with_id(id: ProductId, name: impl Into<String>, barcode: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            search_key: name.to_lowercase(),
            name,
            barcode: barcode.into(),
            id,
            visible: true,
        }
    }

    /// Synthesize a product from a seed entry
    #[inline]
    #[must_use]
    pub fn from_seed(entry: SeedEntry) -> Self {
        Self::new(entry.name, entry.barcode)
    }

    /// Product id
    #[inline]
    #[must_use]
    pub fn id(&self) -> &ProductId {
        &self.id
    }

    /// Display name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Barcode payload
    #[inline]
    #[must_use]
    pub fn barcode(&self) -> &str {
        &self.barcode
    }

    /// Lowercased name used for search
    #[inline]
    #[must_use]
    pub fn search_key(&self) -> &str {
        &self.search_key
    }

    /// Whether the product shows in browse mode
    #[inline]
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Replace the name and recompute the search key
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.search_key = self.name.to_lowercase();
    }

    /// Replace the barcode payload
    pub fn recode(&mut self, barcode: impl Into<String>) {
        self.barcode = barcode.into();
    }

    /// Flip visibility, returning the new state
    pub fn toggle_visibility(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }

    /// Set visibility explicitly
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Check the derived search key still matches the name
    ///
    /// Always true for products built through this type; a hand-edited
    /// storage slot can break it.
    #[inline]
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.search_key == self.name.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn new_product_is_visible_with_derived_key() {
        let product = Product::new("Lait", "123");
        assert_eq!(product.name(), "Lait");
        assert_eq!(product.barcode(), "123");
        assert_eq!(product.search_key(), "lait");
        assert!(product.is_visible());
        assert!(!product.id().as_str().is_empty());
    }

    #[test]
    fn generated_ids_differ() {
        let a = Product::new("A", "1");
        let b = Product::new("A", "1");
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn rename_keeps_id_and_visibility() {
        let mut product = Product::new("Lait", "123");
        product.set_visible(false);
        let id = product.id().clone();

        product.rename("Lait Bio");

        assert_eq!(product.id(), &id);
        assert!(!product.is_visible());
        assert_eq!(product.search_key(), "lait bio");
    }

    #[test]
    fn toggle_returns_new_state() {
        let mut product = Product::new("Beurre", "456");
        assert!(!product.toggle_visibility());
        assert!(product.toggle_visibility());
    }

    #[test]
    fn serializes_with_stored_field_names() {
        let product = Product::with_id(ProductId::new("abc"), "Œufs", "789");
        let json = serde_json::to_value(&product).unwrap();

        assert_eq!(json["name"], "Œufs");
        assert_eq!(json["barcode"], "789");
        assert_eq!(json["id"], "abc");
        assert_eq!(json["visible"], true);
        assert_eq!(json["searchName"], "œufs");
    }

    #[test]
    fn accepts_search_key_alias() {
        let json = r#"{"name":"Pain","barcode":"1","id":"x","visible":false,"searchKey":"pain"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.search_key(), "pain");
        assert!(!product.is_visible());
    }

    #[test]
    fn stored_key_is_trusted_verbatim() {
        let json = r#"{"name":"Pain","barcode":"1","id":"x","visible":true,"searchName":"stale"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.search_key(), "stale");
        assert!(!product.is_consistent());
    }

    #[test]
    fn seed_entry_ignores_extra_fields() {
        let json = r#"{"name":"Lait","barcode":"123","category":"frais"}"#;
        let entry: SeedEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry, SeedEntry::new("Lait", "123"));
    }

    proptest! {
        #[test]
        fn search_key_follows_every_rename(names in proptest::collection::vec("\\PC{0,12}", 1..8)) {
            let mut product = Product::new("Start", "0");
            for name in names {
                product.rename(name.clone());
                prop_assert_eq!(product.search_key(), name.to_lowercase());
                prop_assert!(product.is_consistent());
            }
        }
    }
}
