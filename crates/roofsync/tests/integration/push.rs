//! Push outcomes. Push never changes local state and never runs on local
//! data it could not read.

use std::sync::Arc;

use roofsync::SyncOutcome;
use roofsync_client::{MemoryDocumentStore, WritePolicy};
use roofsync_core::{PropertyCollection, PropertyId};
use roofsync_store::{KeyValueStore, PROPERTIES_KEY};

use crate::common::{Device, TOKEN, UnreadableCollection, shared_remote, survey};

#[tokio::test]
async fn test_push_without_credential() {
    let remote = shared_remote();
    let device = Device::new(Arc::clone(&remote));
    device.portfolio.add(survey("3 Quarry Ln", 6_000.0)).unwrap();

    assert_eq!(device.sync.push().await, SyncOutcome::NeedsCredential);
    assert_eq!(remote.write_count(), 0);
}

#[tokio::test]
async fn test_push_writes_entire_collection() {
    let remote = shared_remote();
    let device = Device::signed_in(Arc::clone(&remote));
    device.portfolio.add(survey("3 Quarry Ln", 6_000.0)).unwrap();
    device.portfolio.add(survey("4 Quarry Ln", 7_000.0)).unwrap();

    let outcome = device.sync.push().await;
    assert_eq!(outcome.records(), Some(2));
    assert_eq!(outcome.version().cloned(), remote.version());

    let written =
        PropertyCollection::from_json_slice(remote.raw().unwrap().as_bytes()).unwrap();
    assert_eq!(written, device.portfolio.list());
}

#[tokio::test]
async fn test_push_empty_collection_creates_document() {
    let remote = shared_remote();
    let device = Device::signed_in(Arc::clone(&remote));

    let outcome = device.sync.push().await;
    assert!(outcome.is_success());
    assert_eq!(outcome.records(), Some(0));
    assert_eq!(remote.raw().as_deref(), Some("[]"));
}

#[tokio::test]
async fn test_repeated_push_creates_new_versions() {
    let remote = shared_remote();
    let device = Device::signed_in(Arc::clone(&remote));

    let first = device.sync.push().await;
    let second = device.sync.push().await;
    assert_ne!(first.version(), second.version());
    assert_eq!(remote.write_count(), 2);
}

#[tokio::test]
async fn test_push_unauthorized_leaves_everything_alone() {
    let remote = shared_remote();
    remote.seed_raw("[]");
    let device = Device::new(Arc::clone(&remote));
    device.sign_in("ghp_wrong");
    device.portfolio.add(survey("3 Quarry Ln", 6_000.0)).unwrap();
    let before = device.portfolio.list();

    assert_eq!(device.sync.push().await, SyncOutcome::Unauthorized);
    assert_eq!(device.portfolio.list(), before);
    assert_eq!(remote.raw().as_deref(), Some("[]"));
    assert!(device.local.credential().is_some());
}

#[tokio::test]
async fn test_last_writer_wins_by_default() {
    let remote = shared_remote();
    let a = Device::signed_in(Arc::clone(&remote));
    let b = Device::signed_in(Arc::clone(&remote));

    a.portfolio.add(survey("A Site", 2_000.0)).unwrap();
    assert!(a.sync.push().await.is_success());
    b.portfolio.add(survey("B Site", 2_000.0)).unwrap();
    assert!(b.sync.push().await.is_success());

    a.portfolio.add(survey("A Site 2", 2_000.0)).unwrap();
    assert!(a.sync.push().await.is_success());

    let written =
        PropertyCollection::from_json_slice(remote.raw().unwrap().as_bytes()).unwrap();
    assert_eq!(written, a.portfolio.list());
}

#[tokio::test]
async fn test_reject_stale_detects_intervening_write() {
    let remote = Arc::new(
        MemoryDocumentStore::new()
            .with_accepted_token(TOKEN)
            .with_write_policy(WritePolicy::RejectStale),
    );
    remote.seed_raw("[]");
    let a = Device::signed_in(Arc::clone(&remote));
    let b = Device::signed_in(Arc::clone(&remote));

    assert!(a.sync.pull().await.is_success());
    assert!(b.sync.pull().await.is_success());

    b.portfolio.add(survey("B Site", 2_000.0)).unwrap();
    assert!(b.sync.push().await.is_success());

    a.portfolio.add(survey("A Site", 2_000.0)).unwrap();
    let outcome = a.sync.push().await;
    assert_eq!(outcome, SyncOutcome::Conflict);
    assert!(outcome.is_retryable());
    assert_eq!(a.addresses(), vec!["A Site"]);

    // Pull picks up B's write (and drops A's unpushed record).
    assert!(a.sync.pull().await.is_success());
    assert_eq!(a.addresses(), vec!["B Site"]);
    a.portfolio.add(survey("A Site", 2_000.0)).unwrap();
    assert!(a.sync.push().await.is_success());
}

#[tokio::test]
async fn test_push_with_unreadable_local_data_leaves_remote_alone() {
    let remote = shared_remote();
    let office = Device::signed_in(Arc::clone(&remote));
    office.portfolio.add(survey("1 Warehouse Row", 20_000.0)).unwrap();
    assert!(office.sync.push().await.is_success());
    let before = remote.raw();

    let device = Device::with_backend(Arc::clone(&remote), UnreadableCollection::default());
    device.sign_in(TOKEN);

    let outcome = device.sync.push().await;
    match &outcome {
        SyncOutcome::LocalStoreFailed { message } => assert!(message.contains("solar_properties")),
        other => panic!("unexpected outcome {other:?}"),
    }
    assert!(outcome.is_retryable());
    assert_eq!(remote.raw(), before);
    assert_eq!(remote.write_count(), 1);
    assert!(device.sync.last_version().is_none());
}

#[test]
fn test_edits_refuse_to_overwrite_unreadable_local_data() {
    let backend = UnreadableCollection::default();
    backend.inner.write(PROPERTIES_KEY, "[\"kept\"]").unwrap();
    let device = Device::with_backend(shared_remote(), backend);

    let err = device.portfolio.add(survey("2 Warehouse Row", 5_000.0)).unwrap_err();
    assert!(matches!(err, roofsync::Error::Store(_)));
    assert!(!err.is_validation());

    let missing = PropertyId::from("anything");
    assert!(device.portfolio.remove(&missing).is_err());

    let stored = device.local.backend().inner.read(PROPERTIES_KEY).unwrap();
    assert_eq!(stored.as_deref(), Some("[\"kept\"]"));
}
