use std::path::PathBuf;

use spotlogin::management::{AuthStateStore, FileStateStore, MemoryStateStore};

fn temp_store(name: &str) -> (FileStateStore, PathBuf) {
    let path = std::env::temp_dir().join(format!(
        "spotlogin-test-{}-{}/auth_state",
        name,
        std::process::id()
    ));
    (FileStateStore::with_path(path.clone()), path)
}

#[tokio::test]
async fn file_store_roundtrip() {
    let (store, path) = temp_store("roundtrip");

    assert_eq!(store.get().await.unwrap(), None);

    store.set("ABCDEF0123456789").await.unwrap();
    assert_eq!(
        store.get().await.unwrap(),
        Some("ABCDEF0123456789".to_string())
    );

    store.remove().await.unwrap();
    assert_eq!(store.get().await.unwrap(), None);

    let _ = async_fs::remove_file(&path).await;
}

#[tokio::test]
async fn file_store_set_overwrites() {
    let (store, path) = temp_store("overwrite");

    store.set("first").await.unwrap();
    store.set("second").await.unwrap();
    assert_eq!(store.get().await.unwrap(), Some("second".to_string()));

    let _ = async_fs::remove_file(&path).await;
}

#[tokio::test]
async fn file_store_remove_is_idempotent() {
    let (store, _path) = temp_store("idempotent");

    // Removing an absent value is not an error
    store.remove().await.unwrap();
    store.remove().await.unwrap();
}

#[tokio::test]
async fn memory_store_roundtrip() {
    let store = MemoryStateStore::new();

    assert_eq!(store.get().await.unwrap(), None);
    store.set("XYZ").await.unwrap();
    assert_eq!(store.get().await.unwrap(), Some("XYZ".to_string()));
    store.remove().await.unwrap();
    assert_eq!(store.get().await.unwrap(), None);
}
