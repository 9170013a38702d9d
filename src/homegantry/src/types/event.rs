use crate::storage::settings::{DashboardSettings, StackConfig};
use crate::types::service::Service;
use serde::Serialize;
use std::collections::BTreeMap;

/// Change notification published on the event bus.
///
/// Serialized as `{"type": "...", "data": ...}` so it can be forwarded to SSE
/// clients unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum CatalogEvent {
    ServiceUpdated(Service),
    ServiceRemoved { id: String },
    SettingsUpdated(DashboardSettings),
    StacksUpdated(BTreeMap<String, StackConfig>),
}

impl CatalogEvent {
    pub fn service_id(&self) -> Option<&str> {
        match self {
            CatalogEvent::ServiceUpdated(service) => Some(&service.id),
            CatalogEvent::ServiceRemoved { id } => Some(id),
            _ => None,
        }
    }
}
