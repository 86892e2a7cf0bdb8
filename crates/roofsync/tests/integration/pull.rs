//! Pull outcomes and their effect on the local collection.

use std::sync::Arc;

use roofsync::SyncOutcome;
use roofsync_client::{ContentsClient, MemoryDocumentStore, RemoteConfig};
use roofsync_core::{SyncState, VersionToken};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{Device, ReadOnlyCollection, TOKEN, shared_remote, survey};

#[tokio::test]
async fn test_pull_without_credential_does_not_contact_remote() {
    let remote = shared_remote();
    remote.seed_raw("not json at all");
    let device = Device::new(Arc::clone(&remote));
    device.portfolio.add(survey("12 Kiln Rd", 4_000.0)).unwrap();

    assert_eq!(device.sync.pull().await, SyncOutcome::NeedsCredential);
    assert_eq!(device.addresses(), vec!["12 Kiln Rd"]);
}

#[tokio::test]
async fn test_pull_missing_document_clears_local() {
    let device = Device::signed_in(shared_remote());
    device.portfolio.add(survey("12 Kiln Rd", 4_000.0)).unwrap();

    let outcome = device.sync.pull().await;
    assert_eq!(outcome, SyncOutcome::RemoteMissing);
    assert!(outcome.is_success());
    assert!(device.portfolio.list().is_empty());
    assert!(device.sync.last_version().is_none());
}

#[tokio::test]
async fn test_pull_http_not_found_clears_local() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/acme/surveys/contents/data/properties.json"))
        .and(header("authorization", format!("token {TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"message":"Not Found"}"#))
        .expect(1)
        .mount(&server)
        .await;
    let client =
        ContentsClient::new(RemoteConfig::new("acme", "surveys").with_api_base(server.uri()))
            .unwrap();
    let device = Device::signed_in(client);
    device.portfolio.add(survey("12 Kiln Rd", 4_000.0)).unwrap();

    let outcome = device.sync.pull().await;
    assert_eq!(outcome, SyncOutcome::RemoteMissing);
    assert!(device.portfolio.list().is_empty());
    assert!(device.local.load().is_empty());
    assert!(device.sync.last_version().is_none());
}

#[tokio::test]
async fn test_pull_replaces_local_wholesale() {
    let remote = shared_remote();
    let office = Device::signed_in(Arc::clone(&remote));
    office.portfolio.add(survey("1 Warehouse Row", 20_000.0)).unwrap();
    office.portfolio.add(survey("2 Warehouse Row", 30_000.0)).unwrap();
    assert!(office.sync.push().await.is_success());

    let field = Device::signed_in(Arc::clone(&remote));
    field.portfolio.add(survey("99 Local Only Ct", 5_000.0)).unwrap();

    let outcome = field.sync.pull().await;
    match &outcome {
        SyncOutcome::Pulled { records, version } => {
            assert_eq!(*records, 2);
            assert_eq!(Some(version.clone()), remote.version());
        }
        other => panic!("unexpected outcome {other:?}"),
    }
    assert_eq!(field.addresses(), office.addresses());
    assert_eq!(field.portfolio.list(), office.portfolio.list());
}

#[tokio::test]
async fn test_pull_unauthorized_keeps_local_and_credential() {
    let remote = shared_remote();
    remote.seed_raw("[]");
    let device = Device::new(Arc::clone(&remote));
    device.sign_in("ghp_revoked");
    device.portfolio.add(survey("7 Forge St", 8_000.0)).unwrap();

    assert_eq!(device.sync.pull().await, SyncOutcome::Unauthorized);
    assert_eq!(device.addresses(), vec!["7 Forge St"]);
    assert_eq!(device.local.credential().unwrap().expose(), "ghp_revoked");
    assert_eq!(device.sync.current_sync_state(), SyncState::Idle);
}

#[tokio::test]
async fn test_pull_invalid_remote_content_is_transport_error() {
    let remote = shared_remote();
    remote.seed_raw(r#"[{"id": "1", "address": "half a record"}]"#);
    let device = Device::signed_in(Arc::clone(&remote));
    device.portfolio.add(survey("7 Forge St", 8_000.0)).unwrap();

    let outcome = device.sync.pull().await;
    assert!(matches!(outcome, SyncOutcome::TransportError { .. }));
    assert!(outcome.is_retryable());
    assert_eq!(device.addresses(), vec!["7 Forge St"]);
}

#[tokio::test]
async fn test_pull_save_failure_is_reported() {
    let remote = shared_remote();
    remote.seed_raw("[]");
    let device = Device::with_backend(Arc::clone(&remote), ReadOnlyCollection::default());
    device.sign_in(TOKEN);

    let outcome = device.sync.pull().await;
    match outcome {
        SyncOutcome::LocalStoreFailed { message } => {
            assert!(message.contains("read-only"));
        }
        other => panic!("unexpected outcome {other:?}"),
    }
    assert!(device.sync.last_version().is_none());
}

#[tokio::test]
async fn test_pull_records_version_for_next_push() {
    let remote = Arc::new(MemoryDocumentStore::new());
    let seeded: VersionToken = remote.seed_raw("[]");
    let device = Device::signed_in(Arc::clone(&remote));

    assert!(device.sync.pull().await.is_success());
    assert_eq!(device.sync.last_version(), Some(seeded));
}
