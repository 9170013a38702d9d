use crate::storage::json_store::JsonStore;
use crate::types::{Service, ServiceSource, ServiceStatus};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// A dashboard entry with no backing container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualService {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub sort_order: i32,
}

impl From<&ManualService> for Service {
    fn from(manual: &ManualService) -> Self {
        Service {
            id: manual.id.clone(),
            source: ServiceSource::Manual,
            name: manual.display_name.clone(),
            description: manual.description.clone(),
            url: manual.url.clone(),
            icon: manual.icon.clone(),
            category: manual.category.clone(),
            status: ServiceStatus::Running,
            stack: None,
            container: None,
            hidden: false,
            sort_order: manual.sort_order,
        }
    }
}

/// Request body for a new manual service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewManualService {
    pub display_name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub sort_order: i32,
}

/// Partial update of a manual service. The id is never patched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualServicePatch {
    pub display_name: Option<String>,
    pub url: Option<String>,
    pub icon: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub sort_order: Option<i32>,
}

impl ManualService {
    fn apply(&mut self, patch: ManualServicePatch) {
        if let Some(display_name) = patch.display_name {
            self.display_name = display_name;
        }
        if let Some(url) = patch.url {
            self.url = url;
        }
        if let Some(icon) = patch.icon {
            self.icon = icon;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(sort_order) = patch.sort_order {
            self.sort_order = sort_order;
        }
    }
}

pub struct ManualServiceStore {
    store: JsonStore<Vec<ManualService>>,
}

impl ManualServiceStore {
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            store: JsonStore::open(path, Vec::new()).await,
        }
    }

    pub async fn list(&self) -> Vec<ManualService> {
        self.store.get().await.to_vec()
    }

    pub async fn create(&self, new: NewManualService) -> Result<ManualService> {
        let entry = ManualService {
            id: Uuid::new_v4().to_string(),
            display_name: new.display_name,
            url: new.url,
            icon: new.icon,
            category: new.category,
            description: new.description,
            sort_order: new.sort_order,
        };
        self.store
            .update(|services| {
                services.push(entry.clone());
            })
            .await?;
        Ok(entry)
    }

    /// Returns `None` if no manual service has this id.
    pub async fn update(&self, id: &str, patch: ManualServicePatch) -> Result<Option<ManualService>> {
        if !self.store.get().await.iter().any(|s| s.id == id) {
            return Ok(None);
        }
        self.store
            .update(|services| {
                services.iter_mut().find(|s| s.id == id).map(|service| {
                    service.apply(patch);
                    service.clone()
                })
            })
            .await
    }

    /// Returns whether a manual service was deleted.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        if !self.store.get().await.iter().any(|s| s.id == id) {
            return Ok(false);
        }
        self.store
            .update(|services| {
                let before = services.len();
                services.retain(|s| s.id != id);
                services.len() != before
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn new_service(name: &str) -> NewManualService {
        NewManualService {
            display_name: name.to_string(),
            url: "https://router.lan".to_string(),
            category: "Network".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_assigns_unique_ids() {
        let dir = TempDir::new().unwrap();
        let store = ManualServiceStore::open(dir.path().join("manual-services.json")).await;
        let a = store.create(new_service("Router")).await.unwrap();
        let b = store.create(new_service("Switch")).await.unwrap();
        assert_ne!(a.id, b.id);
        assert!(Uuid::parse_str(&a.id).is_ok());
        assert_eq!(store.list().await, vec![a, b]);
    }

    #[tokio::test]
    async fn test_update_merges_and_preserves_id() {
        let dir = TempDir::new().unwrap();
        let store = ManualServiceStore::open(dir.path().join("manual-services.json")).await;
        let created = store.create(new_service("Router")).await.unwrap();

        let updated = store
            .update(
                &created.id,
                ManualServicePatch {
                    display_name: Some("Gateway".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.display_name, "Gateway");
        assert_eq!(updated.url, created.url);

        assert!(store
            .update("missing", ManualServicePatch::default())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_delete() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("manual-services.json");
        let store = ManualServiceStore::open(&path).await;
        let created = store.create(new_service("Router")).await.unwrap();

        assert!(!store.delete("missing").await.unwrap());
        assert!(store.delete(&created.id).await.unwrap());
        assert!(ManualServiceStore::open(&path).await.list().await.is_empty());
    }

    #[test]
    fn test_manual_service_to_service() {
        let manual = ManualService {
            id: "m1".to_string(),
            display_name: "Router".to_string(),
            url: "https://router.lan".to_string(),
            icon: "router".to_string(),
            category: "Network".to_string(),
            description: String::new(),
            sort_order: 4,
        };
        let service = Service::from(&manual);
        assert_eq!(service.source, ServiceSource::Manual);
        assert_eq!(service.status, ServiceStatus::Running);
        assert_eq!(service.name, "Router");
        assert_eq!(service.sort_order, 4);
        assert!(!service.hidden);
        assert!(service.container.is_none());
    }
}
