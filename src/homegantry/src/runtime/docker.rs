use crate::runtime::{ContainerRuntime, EventKind, EventStream, RuntimeEvent};
use crate::types::ContainerSnapshot;
use anyhow::{Context, Result};
use bollard::models::{ContainerSummary, EventMessage};
use bollard::query_parameters::{EventsOptionsBuilder, ListContainersOptionsBuilder};
use bollard::Docker;
use futures_util::StreamExt;
use std::collections::HashMap;
use tracing::{debug, trace};

const REQUEST_TIMEOUT_SECS: u64 = 120;

/// [`ContainerRuntime`] backed by the Docker Engine API over a unix socket.
#[derive(Clone)]
pub struct DockerRuntime {
    docker: Docker,
}

impl DockerRuntime {
    /// Prepares a client for `socket`. No request is made until the first call.
    pub fn connect(socket: &str) -> Result<Self> {
        let docker =
            Docker::connect_with_socket(socket, REQUEST_TIMEOUT_SECS, bollard::API_DEFAULT_VERSION)
                .with_context(|| format!("failed to create docker client for {}", socket))?;
        Ok(Self { docker })
    }
}

#[async_trait::async_trait]
impl ContainerRuntime for DockerRuntime {
    async fn list_snapshots(&self, include_stopped: bool) -> Result<Vec<ContainerSnapshot>> {
        let mut builder = ListContainersOptionsBuilder::default().all(include_stopped);
        if !include_stopped {
            let filters = HashMap::from_iter([("status", vec!["running".to_string()])]);
            builder = builder.filters(&filters);
        }
        let containers = self
            .docker
            .list_containers(Some(builder.build()))
            .await
            .context("failed to list containers")?;
        trace!("docker returned {} containers", containers.len());
        Ok(containers.into_iter().filter_map(to_snapshot).collect())
    }

    async fn subscribe_events(&self, kinds: &[EventKind]) -> Result<EventStream> {
        // the event request is only sent once the stream is polled
        self.docker
            .ping()
            .await
            .context("container runtime is not reachable")?;

        let filters = HashMap::from_iter([
            ("type", vec!["container".to_string()]),
            ("event", kinds.iter().map(|kind| kind.to_string()).collect()),
        ]);
        let events_options = EventsOptionsBuilder::default().filters(&filters).build();
        let stream = self
            .docker
            .events(Some(events_options))
            .filter_map(|message| async move {
                match message {
                    Ok(message) => to_runtime_event(message).map(Ok),
                    Err(e) => Some(Err(anyhow::Error::new(e).context("docker event stream failed"))),
                }
            });
        Ok(stream.boxed())
    }
}

fn to_snapshot(summary: ContainerSummary) -> Option<ContainerSnapshot> {
    let id = summary.id?;
    let name = summary
        .names
        .as_ref()
        .and_then(|names| names.first())
        .map(|name| name.trim_start_matches('/').to_string())
        .unwrap_or_default();
    let mut snapshot = ContainerSnapshot::new(id, name, summary.image.unwrap_or_default())
        .with_state(
            summary
                .state
                .map(|state| state.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        );
    for (key, value) in summary.labels.unwrap_or_default() {
        snapshot = snapshot.with_label(key, value);
    }
    for port in summary.ports.unwrap_or_default() {
        match port.public_port {
            Some(public) if public != 0 && port.private_port != 0 => {
                snapshot = snapshot.with_port(port.private_port, public);
            }
            _ => {}
        }
    }
    Some(snapshot)
}

fn to_runtime_event(message: EventMessage) -> Option<RuntimeEvent> {
    let action = message.action.as_deref()?;
    let Some(kind) = EventKind::from_action(action) else {
        debug!("ignoring docker event {}", action);
        return None;
    };
    let container_id = message.actor.and_then(|actor| actor.id).unwrap_or_default();
    Some(RuntimeEvent { kind, container_id })
}
