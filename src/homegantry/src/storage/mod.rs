pub mod json_store;
pub mod manual_services;
pub mod overrides;
pub mod settings;

use crate::constants::{MANUAL_SERVICES_FILE, OVERRIDES_FILE, SETTINGS_FILE, STACKS_FILE};
use std::path::Path;
use std::sync::Arc;

pub use json_store::JsonStore;
pub use manual_services::{ManualService, ManualServicePatch, ManualServiceStore, NewManualService};
pub use overrides::{OverrideMap, OverrideStore, ServiceOverride};
pub use settings::{
    DashboardSettings, GroupBy, Layout, SettingsPatch, SettingsStore, StackConfig, StackMap,
    StackStore,
};

/// Every persisted store, rooted at one data directory.
pub struct Stores {
    /// Shared with the catalog engine, which reads overrides while matching.
    pub overrides: Arc<OverrideStore>,
    pub manual_services: ManualServiceStore,
    pub settings: SettingsStore,
    pub stacks: StackStore,
}

impl Stores {
    pub async fn open(data_dir: &Path, default_settings: DashboardSettings) -> Self {
        Self {
            overrides: Arc::new(OverrideStore::open(data_dir.join(OVERRIDES_FILE)).await),
            manual_services: ManualServiceStore::open(data_dir.join(MANUAL_SERVICES_FILE)).await,
            settings: SettingsStore::open(data_dir.join(SETTINGS_FILE), default_settings).await,
            stacks: StackStore::open(data_dir.join(STACKS_FILE)).await,
        }
    }
}
