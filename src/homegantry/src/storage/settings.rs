use crate::storage::json_store::JsonStore;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    Grid,
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    Category,
    Stack,
}

/// Presentation preferences shared by every dashboard client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSettings {
    pub dashboard_title: String,
    pub columns: u32,
    pub show_status: bool,
    pub layout: Layout,
    pub show_stopped: bool,
    pub group_by: GroupBy,
}

impl DashboardSettings {
    pub fn with_defaults(title: &str, show_stopped: bool) -> Self {
        Self {
            dashboard_title: title.to_string(),
            columns: 4,
            show_status: true,
            layout: Layout::Grid,
            show_stopped,
            group_by: GroupBy::Category,
        }
    }

    pub fn apply(&mut self, patch: SettingsPatch) {
        if let Some(dashboard_title) = patch.dashboard_title {
            self.dashboard_title = dashboard_title;
        }
        if let Some(columns) = patch.columns {
            self.columns = columns;
        }
        if let Some(show_status) = patch.show_status {
            self.show_status = show_status;
        }
        if let Some(layout) = patch.layout {
            self.layout = layout;
        }
        if let Some(show_stopped) = patch.show_stopped {
            self.show_stopped = show_stopped;
        }
        if let Some(group_by) = patch.group_by {
            self.group_by = group_by;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    pub dashboard_title: Option<String>,
    pub columns: Option<u32>,
    pub show_status: Option<bool>,
    pub layout: Option<Layout>,
    pub show_stopped: Option<bool>,
    pub group_by: Option<GroupBy>,
}

pub struct SettingsStore {
    store: JsonStore<DashboardSettings>,
}

impl SettingsStore {
    pub async fn open(path: impl Into<PathBuf>, defaults: DashboardSettings) -> Self {
        Self {
            store: JsonStore::open(path, defaults).await,
        }
    }

    pub async fn get(&self) -> Arc<DashboardSettings> {
        self.store.get().await
    }

    /// Merges `patch` and returns the persisted settings.
    pub async fn patch(&self, patch: SettingsPatch) -> Result<DashboardSettings> {
        self.store
            .update(|settings| {
                settings.apply(patch);
                settings.clone()
            })
            .await
    }
}

/// Per-compose-project presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackConfig {
    pub visible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            visible: true,
            icon: None,
            display_name: None,
        }
    }
}

pub type StackMap = BTreeMap<String, StackConfig>;

pub struct StackStore {
    store: JsonStore<StackMap>,
}

impl StackStore {
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            store: JsonStore::open(path, StackMap::new()).await,
        }
    }

    pub async fn all(&self) -> Arc<StackMap> {
        self.store.get().await
    }

    /// Stored config for `name`, or a visible default.
    pub async fn get(&self, name: &str) -> StackConfig {
        self.store.get().await.get(name).cloned().unwrap_or_default()
    }

    /// Stores `config` under `name` and returns the full map.
    pub async fn set(&self, name: &str, config: StackConfig) -> Result<StackMap> {
        self.store
            .update(|stacks| {
                stacks.insert(name.to_string(), config);
                stacks.clone()
            })
            .await
    }
}
