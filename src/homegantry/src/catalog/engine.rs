use crate::catalog::bus::EventBus;
use crate::catalog::diff::CatalogDiff;
use crate::constants::{LABEL_EXCLUDE, SELF_IMAGE_MARKER};
use crate::runtime::ContainerRuntime;
use crate::service_identification::ServiceMatcher;
use crate::storage::overrides::{find_override, OverrideStore};
use crate::types::{CatalogEvent, ContainerSnapshot, Service};
use anyhow::Result;
use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

pub type Catalog = HashMap<String, Service>;

/// Which containers a scan considers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOptions {
    pub include_stopped: bool,
    pub exclude_self: bool,
    pub compose_only: bool,
}

impl ScanOptions {
    fn skip_reason(&self, snapshot: &ContainerSnapshot) -> Option<&'static str> {
        if self.exclude_self {
            if snapshot.label(LABEL_EXCLUDE) == Some("true") {
                return Some("exclude label");
            }
            if snapshot.image.contains(SELF_IMAGE_MARKER) {
                return Some("own image");
            }
        }
        if self.compose_only && snapshot.compose_project.is_none() {
            return Some("not part of a compose project");
        }
        None
    }
}

/// Counts from one successful scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanReport {
    pub services: usize,
    pub updated: usize,
    pub removed: usize,
}

/// Owner of the container-backed catalog.
///
/// Scans and rematches are serialized by the snapshot cache lock; readers get
/// the last published catalog and never a partially built one.
pub struct CatalogEngine {
    runtime: Arc<dyn ContainerRuntime>,
    matcher: ServiceMatcher,
    overrides: Arc<OverrideStore>,
    bus: EventBus,
    options: ScanOptions,
    catalog: RwLock<Arc<Catalog>>,
    // inputs of the current catalog by container id; held for the whole of every write
    snapshots: Mutex<HashMap<String, ContainerSnapshot>>,
    connected: AtomicBool,
}

impl CatalogEngine {
    pub fn new(
        runtime: Arc<dyn ContainerRuntime>,
        matcher: ServiceMatcher,
        overrides: Arc<OverrideStore>,
        bus: EventBus,
        options: ScanOptions,
    ) -> Self {
        Self {
            runtime,
            matcher,
            overrides,
            bus,
            options,
            catalog: RwLock::new(Arc::new(Catalog::new())),
            snapshots: Mutex::new(HashMap::new()),
            connected: AtomicBool::new(false),
        }
    }

    pub fn runtime(&self) -> &Arc<dyn ContainerRuntime> {
        &self.runtime
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn overrides(&self) -> &Arc<OverrideStore> {
        &self.overrides
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    /// Marks the runtime unreachable, e.g. when the event stream drops.
    pub fn mark_disconnected(&self) {
        self.set_connected(false);
    }

    fn set_connected(&self, connected: bool) {
        if self.connected.swap(connected, Ordering::SeqCst) != connected {
            if connected {
                info!("Container runtime connected");
            } else {
                info!("Container runtime disconnected");
            }
        }
    }

    pub async fn catalog(&self) -> Arc<Catalog> {
        self.catalog.read().await.clone()
    }

    /// Catalog entries ordered by sort order, then name.
    pub async fn services(&self) -> Vec<Service> {
        let catalog = self.catalog().await;
        let mut services: Vec<Service> = catalog.values().cloned().collect();
        services.sort_by(|a, b| {
            a.sort_order
                .cmp(&b.sort_order)
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.id.cmp(&b.id))
        });
        services
    }

    /// Distinct non-empty stack names in the catalog, sorted.
    pub async fn discovered_groups(&self) -> Vec<String> {
        let catalog = self.catalog().await;
        catalog
            .values()
            .filter_map(|service| service.stack.as_deref())
            .filter(|stack| !stack.is_empty())
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Rebuilds the catalog from the runtime and publishes the differences.
    ///
    /// On failure the previous catalog is kept and the engine is marked disconnected.
    pub async fn full_scan(&self) -> Result<ScanReport> {
        let mut snapshots = self.snapshots.lock().await;

        let listed = match self.runtime.list_snapshots(self.options.include_stopped).await {
            Ok(listed) => listed,
            Err(e) => {
                warn!("Container scan failed, keeping previous catalog: {:#}", e);
                self.set_connected(false);
                return Err(e);
            }
        };

        let overrides = self.overrides.all().await;
        let mut next = Catalog::with_capacity(listed.len());
        let mut next_snapshots = HashMap::with_capacity(listed.len());
        for snapshot in listed {
            if let Some(reason) = self.options.skip_reason(&snapshot) {
                debug!("Skipping container {}: {}", snapshot.name, reason);
                continue;
            }
            let service_override = find_override(&overrides, &snapshot.id, &snapshot.name);
            let service = self.matcher.match_container(&snapshot, service_override);
            next.insert(snapshot.id.clone(), service);
            next_snapshots.insert(snapshot.id.clone(), snapshot);
        }

        let previous = self.catalog().await;
        let diff = CatalogDiff::between(&previous, &next);
        let report = ScanReport {
            services: next.len(),
            updated: diff.updated.len(),
            removed: diff.removed.len(),
        };

        *self.catalog.write().await = Arc::new(next);
        *snapshots = next_snapshots;
        self.set_connected(true);

        if !diff.is_empty() {
            debug!(
                "Scan found {} services: {} updated, {} removed",
                report.services, report.updated, report.removed
            );
        }
        self.publish(diff);
        Ok(report)
    }

    /// Re-runs matching for one container against its cached snapshot, picking
    /// up override changes. Returns `None` for ids not in the catalog.
    pub async fn rematch(&self, id: &str) -> Option<Service> {
        let snapshots = self.snapshots.lock().await;
        let snapshot = snapshots.get(id)?;
        let service_override = self.overrides.resolve(&snapshot.id, &snapshot.name).await;
        let service = self
            .matcher
            .match_container(snapshot, service_override.as_ref());

        let mut catalog = self.catalog.write().await;
        if catalog.get(id) != Some(&service) {
            let mut next = Catalog::clone(&catalog);
            next.insert(id.to_string(), service.clone());
            *catalog = Arc::new(next);
            drop(catalog);
            self.bus.publish(CatalogEvent::ServiceUpdated(service.clone()));
        }
        Some(service)
    }

    /// Rematches every catalog entry an override stored under `key` can apply to.
    pub async fn rematch_key(&self, key: &str) -> Vec<Service> {
        let ids: Vec<String> = {
            let snapshots = self.snapshots.lock().await;
            let mut ids: Vec<String> = snapshots
                .values()
                .filter(|snapshot| snapshot.id == key || snapshot.name == key)
                .map(|snapshot| snapshot.id.clone())
                .collect();
            ids.sort();
            ids
        };
        let mut rematched = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(service) = self.rematch(&id).await {
                rematched.push(service);
            }
        }
        rematched
    }

    fn publish(&self, diff: CatalogDiff) {
        for id in diff.removed {
            self.bus.publish(CatalogEvent::ServiceRemoved { id });
        }
        for service in diff.updated {
            self.bus.publish(CatalogEvent::ServiceUpdated(service));
        }
    }
}
