//! Disk store behavior against a real filesystem.

use std::time::Duration;

use anteroom_store::{BlobStore, DiskStore, StoreError};
use bytes::Bytes;
use rstest::{fixture, rstest};

#[fixture]
fn temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().unwrap()
}

#[rstest]
#[timeout(Duration::from_secs(5))]
#[tokio::test]
async fn nested_path_creates_directories(temp_dir: tempfile::TempDir) {
    let store = DiskStore::new(temp_dir.path(), "/media/");

    store
        .save("anteroom/nested/deep.txt", Bytes::from_static(b"deep"))
        .await
        .unwrap();

    assert!(temp_dir.path().join("anteroom/nested/deep.txt").is_file());
    let content = store.open("anteroom/nested/deep.txt").await.unwrap();
    assert_eq!(&content[..], b"deep");
}

#[rstest]
#[timeout(Duration::from_secs(5))]
#[tokio::test]
async fn blobs_survive_across_store_instances(temp_dir: tempfile::TempDir) {
    let store = DiskStore::new(temp_dir.path(), "/media/");
    store
        .save("anteroom/kept.bin", Bytes::from_static(b"durable"))
        .await
        .unwrap();

    // A fresh store over the same root sees the blob.
    let reopened = DiskStore::new(temp_dir.path(), "/media/");
    let content = reopened.open("anteroom/kept.bin").await.unwrap();
    assert_eq!(&content[..], b"durable");
}

#[rstest]
#[case("../escape.txt")]
#[case("/etc/passwd")]
#[case("a//b")]
#[timeout(Duration::from_secs(5))]
#[tokio::test]
async fn unsafe_paths_never_reach_the_filesystem(
    #[case] path: &str,
    temp_dir: tempfile::TempDir,
) {
    let store = DiskStore::new(temp_dir.path(), "/media/");

    let result = store.save(path, Bytes::from_static(b"x")).await;
    assert!(matches!(result, Err(StoreError::InvalidPath(_))));
}

#[rstest]
#[timeout(Duration::from_secs(5))]
#[tokio::test]
async fn delete_then_exists(temp_dir: tempfile::TempDir) {
    let store = DiskStore::new(temp_dir.path(), "/media/");
    store.save("a.txt", Bytes::from_static(b"x")).await.unwrap();
    assert!(store.exists("a.txt").await.unwrap());

    store.delete("a.txt").await.unwrap();
    assert!(!store.exists("a.txt").await.unwrap());
}
