use roster_storage::{Storage, StorageError};
use tempfile::TempDir;

async fn storage(temp: &TempDir) -> Storage {
    Storage::builder().root(temp.path().join("data")).connect().await.unwrap()
}

#[tokio::test]
async fn traversal_and_absolute_paths_are_blocked() {
    let temp = TempDir::new().unwrap();
    let storage = storage(&temp).await;

    assert!(matches!(
        storage.resolve("../etc/passwd"),
        Err(StorageError::PathTraversalAttempt { .. })
    ));
    assert!(storage.resolve("snapshots/../../outside.json").is_err());
    assert!(storage.resolve("/etc/passwd").is_err());
    assert!(storage.write("../escape.json", b"{}").await.is_err());
    assert!(!temp.path().join("escape.json").exists());
}

#[tokio::test]
async fn write_then_read_returns_same_bytes() {
    let temp = TempDir::new().unwrap();
    let storage = storage(&temp).await;

    let payload = br#"{"Chess Club":{"participants":[]}}"#;
    storage.write("snapshots/activities.json", payload).await.unwrap();

    assert!(storage.exists("snapshots/activities.json").unwrap());
    assert_eq!(storage.read("snapshots/activities.json").await.unwrap(), payload);
}

#[tokio::test]
async fn overwrite_replaces_content_and_leaves_no_temp_files() {
    let temp = TempDir::new().unwrap();
    let storage = storage(&temp).await;

    storage.write("activities.json", b"first version, longer").await.unwrap();
    storage.write("activities.json", b"second").await.unwrap();

    assert_eq!(storage.read("activities.json").await.unwrap(), b"second");

    let names: Vec<_> = std::fs::read_dir(storage.root())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(names, vec!["activities.json".to_owned()]);
}

#[tokio::test]
async fn missing_file_is_reported_as_not_found() {
    let temp = TempDir::new().unwrap();
    let storage = storage(&temp).await;

    assert!(!storage.exists("nope.json").unwrap());
    assert!(matches!(storage.read("nope.json").await, Err(StorageError::FileNotFound { .. })));
}

#[tokio::test]
async fn connect_without_create_requires_existing_root() {
    let temp = TempDir::new().unwrap();
    let result = Storage::builder().root(temp.path().join("missing")).create(false).connect().await;

    assert!(matches!(result, Err(StorageError::Io { .. })));
}
