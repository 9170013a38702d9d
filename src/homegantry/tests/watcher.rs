mod common;

use common::{engine_for, running, wait_for, wait_for_catalog, FakeRuntime, WAIT};
use homegantry::catalog::ScanOptions;
use homegantry::runtime::EventKind;
use homegantry::watcher::{BackoffOptions, RuntimeWatcher};
use std::time::Duration;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

fn fast_backoff() -> BackoffOptions {
    BackoffOptions {
        initial: Duration::from_millis(10),
        max: Duration::from_millis(40),
    }
}

#[tokio::test]
async fn test_lifecycle_event_triggers_rescan() {
    let dir = TempDir::new().unwrap();
    let runtime = FakeRuntime::new(vec![running("a1", "jellyfin", "jellyfin/jellyfin")]);
    let engine = engine_for(runtime.clone(), dir.path(), ScanOptions::default()).await;
    let token = CancellationToken::new();
    let watcher = RuntimeWatcher::new(engine.clone(), Duration::from_secs(3600), fast_backoff());
    let handle = tokio::spawn(watcher.run(token.clone()));

    assert!(wait_for_catalog(&engine, |catalog| catalog.len() == 1).await);
    assert!(wait_for(|| runtime.subscribe_calls() == 1).await);

    runtime.set_containers(vec![
        running("a1", "jellyfin", "jellyfin/jellyfin"),
        running("b2", "grafana", "grafana/grafana"),
    ]);
    runtime.emit(EventKind::Start, "b2");

    assert!(wait_for_catalog(&engine, |catalog| catalog.contains_key("b2")).await);

    token.cancel();
    tokio::time::timeout(WAIT, handle).await.unwrap().unwrap();
}

#[tokio::test]
async fn test_stream_failure_resubscribes_and_catches_up() {
    let dir = TempDir::new().unwrap();
    let runtime = FakeRuntime::new(vec![running("a1", "jellyfin", "jellyfin/jellyfin")]);
    let engine = engine_for(runtime.clone(), dir.path(), ScanOptions::default()).await;
    let token = CancellationToken::new();
    let watcher = RuntimeWatcher::new(engine.clone(), Duration::from_secs(3600), fast_backoff());
    let handle = tokio::spawn(watcher.run(token.clone()));

    assert!(wait_for(|| runtime.subscribe_calls() == 1).await);
    assert!(wait_for(|| engine.is_connected()).await);

    // a container appears while the stream is down; only the catch-up scan can see it
    runtime.set_containers(vec![
        running("a1", "jellyfin", "jellyfin/jellyfin"),
        running("c3", "sonarr", "linuxserver/sonarr"),
    ]);
    runtime.break_streams();

    assert!(wait_for(|| runtime.subscribe_calls() >= 2).await);
    assert!(wait_for_catalog(&engine, |catalog| catalog.contains_key("c3")).await);
    assert!(wait_for(|| engine.is_connected()).await);

    token.cancel();
    tokio::time::timeout(WAIT, handle).await.unwrap().unwrap();
}

#[tokio::test]
async fn test_unreachable_runtime_keeps_retrying() {
    let dir = TempDir::new().unwrap();
    let runtime = FakeRuntime::new(vec![running("a1", "jellyfin", "jellyfin/jellyfin")]);
    runtime.set_failing(true);
    let engine = engine_for(runtime.clone(), dir.path(), ScanOptions::default()).await;
    let token = CancellationToken::new();
    let watcher = RuntimeWatcher::new(engine.clone(), Duration::from_secs(3600), fast_backoff());
    let handle = tokio::spawn(watcher.run(token.clone()));

    assert!(wait_for(|| runtime.subscribe_calls() >= 3).await);
    assert!(!engine.is_connected());
    assert!(engine.catalog().await.is_empty());

    runtime.set_failing(false);
    assert!(wait_for_catalog(&engine, |catalog| catalog.contains_key("a1")).await);
    assert!(wait_for(|| engine.is_connected()).await);

    token.cancel();
    tokio::time::timeout(WAIT, handle).await.unwrap().unwrap();
}

#[tokio::test]
async fn test_cancellation_stops_all_loops() {
    let dir = TempDir::new().unwrap();
    let runtime = FakeRuntime::new(Vec::new());
    let engine = engine_for(runtime.clone(), dir.path(), ScanOptions::default()).await;
    let token = CancellationToken::new();
    let watcher = RuntimeWatcher::new(engine, Duration::from_millis(20), fast_backoff());
    let handle = tokio::spawn(watcher.run(token.clone()));

    assert!(wait_for(|| runtime.list_calls() >= 2).await);
    token.cancel();
    tokio::time::timeout(WAIT, handle).await.unwrap().unwrap();

    let calls = runtime.list_calls();
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(runtime.list_calls(), calls);
}

#[tokio::test]
async fn test_triggers_during_scan_collapse_into_one_follow_up() {
    let dir = TempDir::new().unwrap();
    let runtime = FakeRuntime::new(vec![running("a1", "jellyfin", "jellyfin/jellyfin")]);
    runtime.set_list_delay(Duration::from_millis(200));
    let engine = engine_for(runtime.clone(), dir.path(), ScanOptions::default()).await;
    let token = CancellationToken::new();
    let watcher = RuntimeWatcher::new(engine.clone(), Duration::from_secs(3600), fast_backoff());
    let handle = tokio::spawn(watcher.run(token.clone()));

    // let the startup and catch-up scans settle
    assert!(wait_for(|| runtime.subscribe_calls() == 1).await);
    assert!(wait_for_catalog(&engine, |catalog| catalog.contains_key("a1")).await);
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert!(wait_for(|| runtime.lists_in_flight() == 0).await);
    let baseline = runtime.list_calls();

    runtime.emit(EventKind::Start, "a1");
    assert!(wait_for(|| runtime.lists_in_flight() == 1).await);
    for _ in 0..10 {
        runtime.emit(EventKind::HealthStatus, "a1");
    }

    tokio::time::sleep(Duration::from_millis(700)).await;
    assert!(wait_for(|| runtime.lists_in_flight() == 0).await);
    assert_eq!(runtime.list_calls() - baseline, 2);
    assert_eq!(runtime.peak_lists_in_flight(), 1);

    token.cancel();
    tokio::time::timeout(WAIT, handle).await.unwrap().unwrap();
}
