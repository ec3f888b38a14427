//! Contract tests for the object-store adapter over the in-memory client.

use fly_core::{Adapter, CreateDirOptions, Error};
use fly_s3::{MemoryObjectStore, ObjectStoreClient, S3Adapter};
use std::sync::Arc;

const BUCKET: &str = "tmp";

fn adapter() -> (Arc<MemoryObjectStore>, S3Adapter) {
    let store = Arc::new(MemoryObjectStore::with_bucket(BUCKET));
    let fs = S3Adapter::new(store.clone(), BUCKET);
    (store, fs)
}

#[tokio::test]
async fn test_directory_lifecycle() {
    let (_store, fs) = adapter();

    fs.create_dir("test/folder", &CreateDirOptions::default())
        .await
        .unwrap();
    assert!(fs.has_dir("test/folder").await.unwrap());

    fs.delete_dir("test/folder").await.unwrap();
    assert!(!fs.has_dir("test/folder").await.unwrap());
}

#[tokio::test]
async fn test_create_dir_writes_empty_marker() {
    let (store, fs) = adapter();

    fs.create_dir("test/folder/", &CreateDirOptions::default())
        .await
        .unwrap();

    assert_eq!(store.keys(BUCKET), vec!["test/folder/".to_string()]);
    let head = store.head_object(BUCKET, "test/folder/").await.unwrap();
    assert_eq!(head.content_length, Some(0));
    assert_eq!(head.content_type, None);
}

#[tokio::test]
async fn test_marker_is_not_a_file() {
    let (_store, fs) = adapter();

    fs.create_dir("folder", &CreateDirOptions::default())
        .await
        .unwrap();
    assert!(!fs.has("folder").await.unwrap());
    assert!(fs.has("folder/").await.unwrap());
}

#[tokio::test]
async fn test_write_does_not_create_markers() {
    let (store, fs) = adapter();

    fs.put("a/b/c.txt", b"x").await.unwrap();

    assert_eq!(store.keys(BUCKET), vec!["a/b/c.txt".to_string()]);
    assert!(!fs.has_dir("a/b").await.unwrap());
}

#[tokio::test]
async fn test_delete_dir_is_not_recursive() {
    let (store, fs) = adapter();

    fs.create_dir("reports", &CreateDirOptions::default())
        .await
        .unwrap();
    fs.put("reports/q1.csv", b"1,2,3").await.unwrap();

    fs.delete_dir("reports").await.unwrap();

    assert!(!fs.has_dir("reports").await.unwrap());
    assert!(fs.has("reports/q1.csv").await.unwrap());
    assert_eq!(store.keys(BUCKET), vec!["reports/q1.csv".to_string()]);
}

#[tokio::test]
async fn test_file_scenario() {
    let (_store, fs) = adapter();

    fs.put("test/hello.txt", b"Hello, world!").await.unwrap();
    fs.copy("test/hello.txt", "test/hello-copy.txt").await.unwrap();
    assert!(fs.has("test/hello.txt").await.unwrap());

    let content = fs.read_and_delete("test/hello-copy.txt").await.unwrap();
    assert_eq!(content, b"Hello, world!");
    assert!(!fs.has("test/hello-copy.txt").await.unwrap());
}

#[tokio::test]
async fn test_write_then_read() {
    let (_store, fs) = adapter();

    fs.put("data.bin", &[0, 1, 2, 255]).await.unwrap();
    fs.put("data.bin", &[9, 9]).await.unwrap();
    assert_eq!(fs.read("data.bin").await.unwrap(), vec![9, 9]);
}

#[tokio::test]
async fn test_delete_then_has_is_false() {
    let (_store, fs) = adapter();

    fs.put("gone.txt", b"bye").await.unwrap();
    fs.delete("gone.txt").await.unwrap();
    assert!(!fs.has("gone.txt").await.unwrap());
}

#[tokio::test]
async fn test_delete_missing_key_does_not_prove_existence() {
    let (_store, fs) = adapter();
    fs.delete("never-written.txt").await.unwrap();
}

#[tokio::test]
async fn test_read_missing_is_not_found() {
    let (_store, fs) = adapter();

    let err = fs.read("missing.txt").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_copy_missing_source_is_not_found() {
    let (_store, fs) = adapter();

    let err = fs.copy("missing.txt", "b.txt").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_copy_keeps_source() {
    let (_store, fs) = adapter();

    fs.put("a.txt", b"original").await.unwrap();
    let before = fs.read("a.txt").await.unwrap();
    fs.copy("a.txt", "b.txt").await.unwrap();

    assert_eq!(fs.read("b.txt").await.unwrap(), before);
    assert_eq!(fs.read("a.txt").await.unwrap(), before);
}

#[tokio::test]
async fn test_rename() {
    let (_store, fs) = adapter();

    fs.put("a.txt", b"moving").await.unwrap();
    fs.rename("a.txt", "archive/a.txt").await.unwrap();

    assert!(!fs.has("a.txt").await.unwrap());
    assert_eq!(fs.read("archive/a.txt").await.unwrap(), b"moving");
}

#[tokio::test]
async fn test_rename_leaves_both_when_delete_fails() {
    let (store, fs) = adapter();

    fs.put("a.txt", b"moving").await.unwrap();
    store.set_fail_deletes(true);

    let err = fs.rename("a.txt", "b.txt").await.unwrap_err();
    assert!(matches!(err, Error::Backend { .. }));
    assert!(fs.has("a.txt").await.unwrap());
    assert!(fs.has("b.txt").await.unwrap());
}

#[tokio::test]
async fn test_read_and_delete_surfaces_delete_failure() {
    let (store, fs) = adapter();

    fs.put("inbox/msg.json", b"{\"id\":1}").await.unwrap();
    store.set_fail_deletes(true);

    let err = fs.read_and_delete("inbox/msg.json").await.unwrap_err();
    assert_eq!(err.recovered_content(), Some(&b"{\"id\":1}"[..]));
    assert!(fs.has("inbox/msg.json").await.unwrap());
}

#[tokio::test]
async fn test_write_without_etag_is_integrity_failure() {
    let (store, fs) = adapter();
    store.set_omit_etags(true);

    let err = fs.put("test/hello.txt", b"Hello").await.unwrap_err();
    assert!(matches!(err, Error::IntegrityFailure { .. }));

    let err = fs
        .create_dir("folder", &CreateDirOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::IntegrityFailure { .. }));
}

#[tokio::test]
async fn test_mime_type_from_metadata() {
    let (store, fs) = adapter();

    fs.put("test/hello.txt", b"Hello, world!").await.unwrap();
    assert_eq!(fs.mime_type("test/hello.txt").await.unwrap(), "text/plain");

    fs.put("test/blob.unknownext", b"?").await.unwrap();
    assert_eq!(fs.mime_type("test/blob.unknownext").await.unwrap(), "");

    store
        .put_object(BUCKET, "raw", b"x".to_vec(), Some("application/x-custom"))
        .await
        .unwrap();
    assert_eq!(fs.mime_type("raw").await.unwrap(), "application/x-custom");
}

#[tokio::test]
async fn test_mime_type_of_missing_object_is_not_found() {
    let (_store, fs) = adapter();

    let err = fs.mime_type("missing.txt").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_has_surfaces_backend_errors() {
    let store = Arc::new(MemoryObjectStore::new());
    let fs = S3Adapter::new(store, "no-such-bucket");

    let err = fs.has("anything.txt").await.unwrap_err();
    assert!(matches!(err, Error::Backend { .. }));
}

#[tokio::test]
async fn test_prefix_scopes_keys() {
    let (store, fs) = adapter();
    let fs = fs.with_prefix("site/");

    fs.put("/index.html", b"<html>").await.unwrap();
    fs.create_dir("assets", &CreateDirOptions::default())
        .await
        .unwrap();

    assert_eq!(
        store.keys(BUCKET),
        vec!["site/assets/".to_string(), "site/index.html".to_string()]
    );
    assert!(fs.has("index.html").await.unwrap());
    assert_eq!(fs.mime_type("index.html").await.unwrap(), "text/html");
}

#[tokio::test]
async fn test_adapter_as_trait_object() {
    let (_store, fs) = adapter();
    let fs: Arc<dyn Adapter> = Arc::new(fs);

    fs.put("x.json", b"{}").await.unwrap();
    assert_eq!(fs.mime_type("x.json").await.unwrap(), "application/json");
}
