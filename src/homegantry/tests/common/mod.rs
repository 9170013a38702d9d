#![allow(dead_code)]

use anyhow::{bail, Result};
use futures_util::StreamExt;
use homegantry::catalog::{Catalog, CatalogEngine, EventBus, ScanOptions};
use homegantry::runtime::{ContainerRuntime, EventKind, EventStream, RuntimeEvent};
use homegantry::service_identification::{KnowledgeBase, MatchOptions, ServiceMatcher};
use homegantry::storage::OverrideStore;
use homegantry::types::{CatalogEvent, ContainerSnapshot};
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};
use tokio_stream::wrappers::UnboundedReceiverStream;

/// In-memory runtime whose containers and event streams are driven by the test.
#[derive(Default)]
pub struct FakeRuntime {
    containers: Mutex<Vec<ContainerSnapshot>>,
    failing: AtomicBool,
    streams: Mutex<Vec<mpsc::UnboundedSender<Result<RuntimeEvent>>>>,
    list_calls: AtomicUsize,
    subscribe_calls: AtomicUsize,
    list_delay: Mutex<Duration>,
    lists_in_flight: AtomicUsize,
    peak_lists_in_flight: AtomicUsize,
}

impl FakeRuntime {
    pub fn new(containers: Vec<ContainerSnapshot>) -> Arc<Self> {
        let runtime = Self::default();
        *runtime.containers.lock().unwrap() = containers;
        Arc::new(runtime)
    }

    pub fn set_containers(&self, containers: Vec<ContainerSnapshot>) {
        *self.containers.lock().unwrap() = containers;
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn emit(&self, kind: EventKind, container_id: &str) {
        for stream in self.streams.lock().unwrap().iter() {
            let _ = stream.send(Ok(RuntimeEvent {
                kind,
                container_id: container_id.to_string(),
            }));
        }
    }

    /// Fails every open event stream and closes it.
    pub fn break_streams(&self) {
        for stream in self.streams.lock().unwrap().drain(..) {
            let _ = stream.send(Err(anyhow::anyhow!("connection reset")));
        }
    }

    /// Makes every listing take `delay`, so scans can overlap if the engine allows it.
    pub fn set_list_delay(&self, delay: Duration) {
        *self.list_delay.lock().unwrap() = delay;
    }

    pub fn lists_in_flight(&self) -> usize {
        self.lists_in_flight.load(Ordering::SeqCst)
    }

    /// Highest number of listings that were ever running at once.
    pub fn peak_lists_in_flight(&self) -> usize {
        self.peak_lists_in_flight.load(Ordering::SeqCst)
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn subscribe_calls(&self) -> usize {
        self.subscribe_calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ContainerRuntime for FakeRuntime {
    async fn list_snapshots(&self, include_stopped: bool) -> Result<Vec<ContainerSnapshot>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let in_flight = self.lists_in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_lists_in_flight.fetch_max(in_flight, Ordering::SeqCst);
        let delay = *self.list_delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.lists_in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing.load(Ordering::SeqCst) {
            bail!("runtime unreachable");
        }
        Ok(self
            .containers
            .lock()
            .unwrap()
            .iter()
            .filter(|snapshot| include_stopped || snapshot.state == "running")
            .cloned()
            .collect())
    }

    async fn subscribe_events(&self, _kinds: &[EventKind]) -> Result<EventStream> {
        self.subscribe_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            bail!("runtime unreachable");
        }
        let (sender, receiver) = mpsc::unbounded_channel();
        self.streams.lock().unwrap().push(sender);
        Ok(UnboundedReceiverStream::new(receiver).boxed())
    }
}

pub fn running(id: &str, name: &str, image: &str) -> ContainerSnapshot {
    ContainerSnapshot::new(id, name, image)
}

pub async fn engine_for(
    runtime: Arc<FakeRuntime>,
    data_dir: &Path,
    options: ScanOptions,
) -> Arc<CatalogEngine> {
    let overrides = Arc::new(OverrideStore::open(data_dir.join("overrides.json")).await);
    engine_with_overrides(runtime, overrides, options)
}

pub fn engine_with_overrides(
    runtime: Arc<FakeRuntime>,
    overrides: Arc<OverrideStore>,
    options: ScanOptions,
) -> Arc<CatalogEngine> {
    let matcher = ServiceMatcher::new(Arc::new(KnowledgeBase::default()), MatchOptions::default());
    Arc::new(CatalogEngine::new(
        runtime,
        matcher,
        overrides,
        EventBus::default(),
        options,
    ))
}

pub fn drain(receiver: &mut broadcast::Receiver<CatalogEvent>) -> Vec<CatalogEvent> {
    let mut events = Vec::new();
    while let Ok(event) = receiver.try_recv() {
        events.push(event);
    }
    events
}

pub const WAIT: Duration = Duration::from_secs(5);

/// Polls `condition` every 10ms until it holds or [`WAIT`] passes.
pub async fn wait_for(mut condition: impl FnMut() -> bool) -> bool {
    let deadline = tokio::time::Instant::now() + WAIT;
    loop {
        if condition() {
            return true;
        }
        if tokio::time::Instant::now() >= deadline {
            return false;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

/// Like [`wait_for`], against the engine's published catalog.
pub async fn wait_for_catalog(
    engine: &CatalogEngine,
    mut condition: impl FnMut(&Catalog) -> bool,
) -> bool {
    let deadline = tokio::time::Instant::now() + WAIT;
    loop {
        if condition(&*engine.catalog().await) {
            return true;
        }
        if tokio::time::Instant::now() >= deadline {
            return false;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
