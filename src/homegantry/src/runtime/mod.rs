pub mod docker;

use crate::types::ContainerSnapshot;
use anyhow::Result;
use futures_util::stream::BoxStream;
use mockall::automock;
use std::fmt;

pub use docker::DockerRuntime;

/// Lifecycle events that can change what the catalog should contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Start,
    Stop,
    Die,
    Destroy,
    Rename,
    HealthStatus,
}

impl EventKind {
    /// Every kind the watcher subscribes to.
    pub const WATCHED: [EventKind; 6] = [
        EventKind::Start,
        EventKind::Stop,
        EventKind::Die,
        EventKind::Destroy,
        EventKind::Rename,
        EventKind::HealthStatus,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Start => "start",
            EventKind::Stop => "stop",
            EventKind::Die => "die",
            EventKind::Destroy => "destroy",
            EventKind::Rename => "rename",
            EventKind::HealthStatus => "health_status",
        }
    }

    /// Parses an event action. Health actions carry the new status
    /// (`health_status: healthy`) and map to [`EventKind::HealthStatus`].
    pub fn from_action(action: &str) -> Option<Self> {
        let base = action.split(':').next().unwrap_or(action).trim();
        Self::WATCHED.into_iter().find(|kind| kind.as_str() == base)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeEvent {
    pub kind: EventKind,
    pub container_id: String,
}

/// Lifecycle events until the runtime closes the stream. Dropping it unsubscribes.
pub type EventStream = BoxStream<'static, Result<RuntimeEvent>>;

/// The container runtime as seen by the catalog engine.
#[automock]
#[async_trait::async_trait]
pub trait ContainerRuntime: Send + Sync {
    /// All containers, or only running ones when `include_stopped` is false.
    async fn list_snapshots(&self, include_stopped: bool) -> Result<Vec<ContainerSnapshot>>;

    async fn subscribe_events(&self, kinds: &[EventKind]) -> Result<EventStream>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("start", Some(EventKind::Start))]
    #[case("die", Some(EventKind::Die))]
    #[case("health_status: unhealthy", Some(EventKind::HealthStatus))]
    #[case("health_status", Some(EventKind::HealthStatus))]
    #[case("exec_start: sh", None)]
    #[case("attach", None)]
    fn test_from_action(#[case] action: &str, #[case] expected: Option<EventKind>) {
        assert_eq!(EventKind::from_action(action), expected);
    }
}
