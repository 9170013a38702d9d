use crate::daemon::error::ApiResult;
use crate::daemon::state::DaemonState;
use crate::storage::{StackConfig, StackMap};
use crate::types::CatalogEvent;
use axum::extract::{Path, State};
use axum::Json;

pub const STACKS_ENDPOINT: &str = "/api/stacks";
pub const STACK_ENDPOINT: &str = "/api/stacks/{name}";
pub const GROUPS_ENDPOINT: &str = "/api/groups";

pub async fn list_stacks(State(state): State<DaemonState>) -> Json<StackMap> {
    Json(StackMap::clone(&*state.stores().stacks.all().await))
}

pub async fn put_stack(
    State(state): State<DaemonState>,
    Path(name): Path<String>,
    Json(config): Json<StackConfig>,
) -> ApiResult<Json<StackMap>> {
    let stacks = state.stores().stacks.set(&name, config).await?;
    state
        .bus()
        .publish(CatalogEvent::StacksUpdated(stacks.clone()));
    Ok(Json(stacks))
}

/// Compose projects seen in the current catalog.
pub async fn list_groups(State(state): State<DaemonState>) -> Json<Vec<String>> {
    Json(state.engine().discovered_groups().await)
}
