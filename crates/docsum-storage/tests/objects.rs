//! Integration tests against a real bucket.
//!
//! These tests call real AWS APIs and require valid credentials plus a
//! writable bucket named in `DOCSUM_TEST_BUCKET`.
//!
//! Run with: `cargo test -p docsum-storage --test objects -- --ignored`

use docsum_storage::client::{build_client, load_sdk_config};
use docsum_storage::error::StorageError;
use docsum_storage::store::{ObjectStore, S3ObjectStore, TEXT_CONTENT_TYPE};

async fn store() -> (S3ObjectStore, String) {
    let bucket = std::env::var("DOCSUM_TEST_BUCKET").expect("DOCSUM_TEST_BUCKET must be set");
    let config = load_sdk_config().await;
    (S3ObjectStore::new(build_client(&config)), bucket)
}

#[tokio::test]
#[ignore]
async fn put_then_get_returns_same_bytes() {
    let (store, bucket) = store().await;
    let key = "docsum-tests/put_then_get.txt";

    store
        .put_object(&bucket, key, b"hello world".to_vec(), TEXT_CONTENT_TYPE)
        .await
        .unwrap();
    let body = store.get_object(&bucket, key).await.unwrap();

    assert_eq!(body, b"hello world");
}

#[tokio::test]
#[ignore]
async fn missing_object_is_not_found() {
    let (store, bucket) = store().await;

    let err = store
        .get_object(&bucket, "docsum-tests/definitely-missing.txt")
        .await
        .unwrap_err();

    assert!(matches!(err, StorageError::NotFound { .. }));
}
