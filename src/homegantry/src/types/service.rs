use crate::types::snapshot::ContainerSnapshot;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceSource {
    Container,
    Manual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Running,
    Stopped,
}

impl ServiceStatus {
    pub fn from_state(state: &str) -> Self {
        if state == crate::constants::RUNNING_STATE {
            ServiceStatus::Running
        } else {
            ServiceStatus::Stopped
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceStatus::Running => "running",
            ServiceStatus::Stopped => "stopped",
        }
    }
}

/// A catalog entry as shown on the dashboard.
///
/// Container-backed services are keyed by container id; manual services by a
/// generated UUID. `icon` is an opaque slug or an absolute URL and is never
/// expanded here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub source: ServiceSource,
    pub name: String,
    pub description: String,
    pub url: String,
    pub icon: String,
    pub category: String,
    pub status: ServiceStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<ContainerSnapshot>,
    pub hidden: bool,
    pub sort_order: i32,
}
