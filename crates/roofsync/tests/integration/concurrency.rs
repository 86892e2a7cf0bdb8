//! Single-flight sync and timeouts.

use std::sync::Arc;
use std::time::Duration;

use roofsync::{DEFAULT_SYNC_TIMEOUT, SyncOutcome};
use roofsync_core::SyncState;

use crate::common::{Device, GatedRemote, StalledRemote, TOKEN};

#[tokio::test]
async fn test_second_operation_while_syncing_is_busy() {
    let remote = Arc::new(GatedRemote::default());
    remote.inner.seed_raw("[]");
    let device = Arc::new(Device::signed_in(Arc::clone(&remote)));
    let mut states = device.sync.subscribe();

    let first = {
        let device = Arc::clone(&device);
        tokio::spawn(async move { device.sync.pull().await })
    };
    remote.entered.notified().await;

    assert_eq!(device.sync.current_sync_state(), SyncState::Syncing);
    assert_eq!(device.sync.push().await, SyncOutcome::Busy);
    assert_eq!(device.sync.pull().await, SyncOutcome::Busy);

    remote.release.notify_one();
    let outcome = first.await.unwrap();
    assert!(matches!(outcome, SyncOutcome::Pulled { records: 0, .. }));

    states.wait_for(|s| s.is_idle()).await.unwrap();
    assert_eq!(device.sync.current_sync_state(), SyncState::Idle);
    assert_eq!(remote.inner.write_count(), 0);
}

#[tokio::test]
async fn test_busy_does_not_queue() {
    let remote = Arc::new(GatedRemote::default());
    let device = Arc::new(Device::signed_in(Arc::clone(&remote)));

    let first = {
        let device = Arc::clone(&device);
        tokio::spawn(async move { device.sync.push().await })
    };
    remote.entered.notified().await;
    assert_eq!(device.sync.push().await, SyncOutcome::Busy);

    remote.release.notify_one();
    assert!(first.await.unwrap().is_success());
    assert_eq!(remote.inner.write_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_stalled_remote_times_out_and_returns_to_idle() {
    let device = Device::signed_in(StalledRemote);
    assert_eq!(device.sync.timeout(), DEFAULT_SYNC_TIMEOUT);

    let outcome = device.sync.pull().await;
    match &outcome {
        SyncOutcome::TransportError { message } => assert!(message.contains("30")),
        other => panic!("unexpected outcome {other:?}"),
    }
    assert_eq!(device.sync.current_sync_state(), SyncState::Idle);

    assert!(matches!(
        device.sync.push().await,
        SyncOutcome::TransportError { .. }
    ));
    assert_eq!(device.sync.current_sync_state(), SyncState::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_custom_timeout() {
    let mut device = Device::new(StalledRemote);
    device.sign_in(TOKEN);
    device.sync = device.sync.with_timeout(Duration::from_secs(5));

    let started = tokio::time::Instant::now();
    let outcome = device.sync.pull().await;
    assert!(matches!(outcome, SyncOutcome::TransportError { .. }));
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_secs(5), "{elapsed:?}");
    assert!(elapsed < Duration::from_secs(6), "{elapsed:?}");
}

#[tokio::test]
async fn test_aborted_operation_releases_flag() {
    let remote = Arc::new(GatedRemote::default());
    let device = Arc::new(Device::signed_in(Arc::clone(&remote)));

    let task = {
        let device = Arc::clone(&device);
        tokio::spawn(async move { device.sync.pull().await })
    };
    remote.entered.notified().await;
    assert_eq!(device.sync.current_sync_state(), SyncState::Syncing);

    task.abort();
    assert!(task.await.unwrap_err().is_cancelled());
    assert_eq!(device.sync.current_sync_state(), SyncState::Idle);
}
