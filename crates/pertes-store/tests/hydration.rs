use pertes_model::{Product, SeedEntry};
use pertes_store::{CatalogStore, FileSlot, Hydration, MemorySlot, StorageSlot, StoreError};
use pertes_test_utils::{lait_seed, sample_products, slot_with, RecordingSeed, UnavailableSeed};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn first_run_imports_lait_seed() {
    let slot = MemorySlot::new("products");
    let seed = RecordingSeed::new(lait_seed());
    let mut store = CatalogStore::new(slot.clone());

    let hydration = store.hydrate(&seed).await.unwrap();

    let Hydration::FromSeed {
        products,
        persisted,
    } = hydration
    else {
        panic!("expected seed import");
    };
    assert!(persisted);
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].name(), "Lait");
    assert_eq!(products[0].barcode(), "123");
    assert_eq!(products[0].search_key(), "lait");
    assert!(products[0].is_visible());
    assert!(!products[0].id().as_str().is_empty());

    let stored: Vec<Product> = stored_products(&slot);
    assert_eq!(stored, products);
}

#[tokio::test]
async fn seed_is_consulted_at_most_once() {
    let slot = MemorySlot::new("products");
    let seed = RecordingSeed::new(lait_seed());

    let first = CatalogStore::new(slot.clone()).hydrate(&seed).await.unwrap();
    let second = CatalogStore::new(slot.clone()).hydrate(&seed).await.unwrap();

    assert_eq!(seed.fetch_count(), 1);
    assert!(first.is_from_seed());
    assert!(!second.is_from_seed());
    assert_eq!(first.products(), second.products());
}

#[tokio::test]
async fn missing_seed_with_empty_storage_is_fatal() {
    let mut store = CatalogStore::new(MemorySlot::new("products"));

    let err = store.hydrate(&UnavailableSeed).await.unwrap_err();

    assert!(matches!(err, StoreError::SeedUnavailable(_)));
    assert!(err.is_fatal());
}

#[tokio::test]
async fn missing_seed_is_irrelevant_once_stored() {
    let products = sample_products();
    let mut store = CatalogStore::new(slot_with(&products));

    let hydration = store.hydrate(&UnavailableSeed).await.unwrap();

    assert_eq!(hydration, Hydration::FromStorage(products));
}

#[tokio::test]
async fn persist_then_hydrate_round_trips() {
    let mut products = sample_products();
    products[1].set_visible(false);
    products[2].rename("Éclair au café");

    let slot = MemorySlot::new("products");
    CatalogStore::new(slot.clone()).persist(&products).unwrap();

    let seed = RecordingSeed::new(vec![SeedEntry::new("ignored", "0")]);
    let hydration = CatalogStore::new(slot).hydrate(&seed).await.unwrap();

    assert_eq!(hydration.into_products(), products);
    assert_eq!(seed.fetch_count(), 0);
}

#[tokio::test]
async fn file_slot_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let seed = RecordingSeed::new(lait_seed());

    let first = CatalogStore::new(FileSlot::new(dir.path(), "products"))
        .hydrate(&seed)
        .await
        .unwrap();
    let second = CatalogStore::new(FileSlot::new(dir.path(), "products"))
        .hydrate(&seed)
        .await
        .unwrap();

    assert_eq!(first.products(), second.products());
    assert_eq!(seed.fetch_count(), 1);
}

#[tokio::test]
async fn clear_brings_back_the_seed() {
    let slot = MemorySlot::new("products");
    let seed = RecordingSeed::new(lait_seed());
    let mut store = CatalogStore::new(slot.clone());

    store.hydrate(&seed).await.unwrap();
    store.clear().unwrap();
    let again = store.hydrate(&seed).await.unwrap();

    assert!(again.is_from_seed());
    assert_eq!(seed.fetch_count(), 2);
    assert!(slot.read().unwrap().is_some());
}

fn stored_products(slot: &MemorySlot) -> Vec<Product> {
    let raw = slot.contents().expect("slot written");
    CatalogStore::new(MemorySlot::with_contents("copy", raw))
        .load()
        .unwrap()
        .unwrap_or_default()
}
