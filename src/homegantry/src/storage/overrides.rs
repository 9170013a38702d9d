use crate::storage::json_store::JsonStore;
use crate::types::Service;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

/// User-authored field overrides for one container. Absent fields are not overridden.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOverride {
    #[serde(rename = "displayName", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
}

impl ServiceOverride {
    /// Replaces every field of `service` that this override defines.
    pub fn apply_to(&self, service: &mut Service) {
        if let Some(name) = &self.name {
            service.name = name.clone();
        }
        if let Some(url) = &self.url {
            service.url = url.clone();
        }
        if let Some(icon) = &self.icon {
            service.icon = icon.clone();
        }
        if let Some(category) = &self.category {
            service.category = category.clone();
        }
        if let Some(description) = &self.description {
            service.description = description.clone();
        }
        if let Some(hidden) = self.hidden {
            service.hidden = hidden;
        }
        if let Some(sort_order) = self.sort_order {
            service.sort_order = sort_order;
        }
    }

    /// Fields set in `patch` replace ours; the rest are kept.
    pub fn merge(&mut self, patch: ServiceOverride) {
        self.name = patch.name.or(self.name.take());
        self.url = patch.url.or(self.url.take());
        self.icon = patch.icon.or(self.icon.take());
        self.category = patch.category.or(self.category.take());
        self.description = patch.description.or(self.description.take());
        self.hidden = patch.hidden.or(self.hidden);
        self.sort_order = patch.sort_order.or(self.sort_order);
    }
}

/// Overrides keyed by container id or container name.
pub type OverrideMap = BTreeMap<String, ServiceOverride>;

/// The override keyed by container id, falling back to the container name.
pub fn find_override<'a>(
    overrides: &'a OverrideMap,
    id: &str,
    name: &str,
) -> Option<&'a ServiceOverride> {
    overrides.get(id).or_else(|| overrides.get(name))
}

pub struct OverrideStore {
    store: JsonStore<OverrideMap>,
}

impl OverrideStore {
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            store: JsonStore::open(path, OverrideMap::new()).await,
        }
    }

    pub async fn all(&self) -> Arc<OverrideMap> {
        self.store.get().await
    }

    /// The override for a container: by id first, then by name.
    pub async fn resolve(&self, id: &str, name: &str) -> Option<ServiceOverride> {
        let overrides = self.store.get().await;
        find_override(&overrides, id, name).cloned()
    }

    /// Merges `patch` into the override stored under `key` and returns the result.
    pub async fn upsert(&self, key: &str, patch: ServiceOverride) -> Result<ServiceOverride> {
        self.store
            .update(|overrides| {
                let entry = overrides.entry(key.to_string()).or_default();
                entry.merge(patch);
                entry.clone()
            })
            .await
    }

    /// Returns whether an override existed under `key`.
    pub async fn remove(&self, key: &str) -> Result<bool> {
        self.store
            .update(|overrides| overrides.remove(key).is_some())
            .await
    }
}
