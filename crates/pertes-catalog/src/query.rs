//! Search and ordering
//!
//! Pure read-side transformations: both functions return a new sequence of
//! references and never touch the catalog.

use crate::collation::base_key;
use pertes_model::Product;

/// Stable alphabetical order by name at French base strength
///
/// Names that compare equal keep their input order.
#[must_use]
pub fn sort_by_name<'a>(products: impl IntoIterator<Item = &'a Product>) -> Vec<&'a Product> {
    let mut sorted: Vec<&Product> = products.into_iter().collect();
    sorted.sort_by_cached_key(|p| base_key(p.name()));
    sorted
}

/// Products whose search key contains the lowercased query
///
/// An empty query returns every product in input order.
#[must_use]
pub fn filter_by_search<'a>(
    products: impl IntoIterator<Item = &'a Product>,
    query: &str,
) -> Vec<&'a Product> {
    if query.is_empty() {
        return products.into_iter().collect();
    }
    let needle = query.to_lowercase();
    products
        .into_iter()
        .filter(|p| p.search_key().contains(&needle))
        .collect()
}
