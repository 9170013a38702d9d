use crate::daemon::error::ApiResult;
use crate::daemon::state::DaemonState;
use crate::storage::ServiceOverride;
use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};
use tracing::debug;

/// `{id}` is a container id or a container name.
pub const OVERRIDE_ENDPOINT: &str = "/api/services/{id}/override";

pub async fn put_override(
    State(state): State<DaemonState>,
    Path(id): Path<String>,
    Json(patch): Json<ServiceOverride>,
) -> ApiResult<Json<Value>> {
    state.stores().overrides.upsert(&id, patch).await?;
    let rematched = state.engine().rematch_key(&id).await;
    debug!("Override for {} saved, {} services rematched", id, rematched.len());
    Ok(Json(json!({ "ok": true })))
}

pub async fn delete_override(
    State(state): State<DaemonState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    if state.stores().overrides.remove(&id).await? {
        let rematched = state.engine().rematch_key(&id).await;
        debug!("Override for {} removed, {} services rematched", id, rematched.len());
    }
    Ok(Json(json!({ "ok": true })))
}
