use crate::constants::{COMPOSE_PROJECT_LABEL, COMPOSE_SERVICE_LABEL};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A published port: the container-side port and the host port it is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortPair {
    pub private: u16,
    pub public: u16,
}

/// Point-in-time read of one container's runtime-visible metadata.
///
/// Snapshots are regenerated on every scan and never persisted. Labels are kept
/// in a `BTreeMap` so that iteration (and therefore matching) is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerSnapshot {
    pub id: String,
    pub name: String,
    pub image: String,
    pub state: String,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compose_project: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compose_service: Option<String>,
    #[serde(default)]
    pub ports: Vec<PortPair>,
}

impl ContainerSnapshot {
    pub fn new(id: impl Into<String>, name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image: image.into(),
            state: crate::constants::RUNNING_STATE.to_string(),
            labels: BTreeMap::new(),
            compose_project: None,
            compose_service: None,
            ports: Vec::new(),
        }
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = state.into();
        self
    }

    /// Adds a label. Compose membership labels also populate the compose fields.
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match key.as_str() {
            COMPOSE_PROJECT_LABEL => self.compose_project = Some(value.clone()),
            COMPOSE_SERVICE_LABEL => self.compose_service = Some(value.clone()),
            _ => {}
        }
        self.labels.insert(key, value);
        self
    }

    pub fn with_port(mut self, private: u16, public: u16) -> Self {
        self.ports.push(PortPair { private, public });
        self
    }

    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }

    /// Label value if present and non-empty.
    pub fn non_empty_label(&self, key: &str) -> Option<&str> {
        self.label(key).filter(|value| !value.is_empty())
    }
}
