use pertes_offline::{
    AssetManifest, CacheStorage, CachedSeed, DirFetcher, OfflineCache, ASSETS, CACHE_GENERATION,
};
use pertes_store::{CatalogStore, MemorySlot, SeedSource};
use pretty_assertions::assert_eq;
use std::path::Path;
use std::sync::Arc;

/// One file per asset; "/" is served by the same index.html as "/index.html"
fn write_site(root: &Path) {
    for asset in ASSETS {
        let relative = asset.trim_start_matches('/');
        if relative.is_empty() {
            continue;
        }
        let file = root.join(relative);
        std::fs::create_dir_all(file.parent().unwrap()).unwrap();
        std::fs::write(&file, format!("contents of {asset}")).unwrap();
    }
    std::fs::write(
        root.join("products.json"),
        r#"[{"name":"Lait","barcode":"123"},{"name":"Beurre","barcode":"456"}]"#,
    )
    .unwrap();
}

#[tokio::test]
async fn release_upgrade_keeps_only_new_generation() {
    let site = tempfile::tempdir().unwrap();
    write_site(site.path());
    let storage = CacheStorage::new();

    let previous = OfflineCache::new(
        DirFetcher::new(site.path()),
        AssetManifest::new("pertes-v0"),
        storage.clone(),
    );
    previous.install().await.unwrap();
    previous.activate();

    let current = OfflineCache::new(
        DirFetcher::new(site.path()),
        AssetManifest::default(),
        storage.clone(),
    );
    current.install().await.unwrap();
    assert_eq!(storage.generations(), ["pertes-v0", CACHE_GENERATION]);

    let removed = current.activate();

    assert_eq!(removed, ["pertes-v0"]);
    assert_eq!(storage.generations(), [CACHE_GENERATION]);
}

#[tokio::test]
async fn first_launch_offline_after_install() {
    let site = tempfile::tempdir().unwrap();
    write_site(site.path());
    let cache = Arc::new(OfflineCache::new(
        DirFetcher::new(site.path()),
        AssetManifest::default(),
        CacheStorage::new(),
    ));
    cache.install().await.unwrap();
    cache.activate();

    std::fs::remove_dir_all(site.path()).unwrap();

    let root = cache.fetch("/").await.unwrap();
    assert_eq!(&root[..], b"contents of /index.html");
    let index = cache.fetch("/index.html").await.unwrap();
    assert_eq!(root, index);

    let seed = CachedSeed::new(cache, "/products.json");
    assert_eq!(seed.fetch().await.unwrap().len(), 2);

    let mut store = CatalogStore::new(MemorySlot::new("products"));
    let hydration = store.hydrate(&seed).await.unwrap();
    assert!(hydration.is_from_seed());
    assert_eq!(hydration.products()[1].search_key(), "beurre");
}

#[tokio::test]
async fn missing_asset_aborts_install() {
    let site = tempfile::tempdir().unwrap();
    write_site(site.path());
    std::fs::remove_file(site.path().join("style.css")).unwrap();
    let storage = CacheStorage::new();
    let cache = OfflineCache::new(
        DirFetcher::new(site.path()),
        AssetManifest::default(),
        storage.clone(),
    );

    assert!(cache.install().await.is_err());
    assert!(storage.generations().is_empty());
}
