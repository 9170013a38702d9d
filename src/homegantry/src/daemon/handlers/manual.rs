use crate::daemon::error::{ApiError, ApiResult};
use crate::daemon::state::DaemonState;
use crate::storage::{ManualService, ManualServicePatch, NewManualService};
use crate::types::{CatalogEvent, Service};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

pub const MANUAL_SERVICES_ENDPOINT: &str = "/api/services/manual";
pub const MANUAL_SERVICE_ENDPOINT: &str = "/api/services/manual/{id}";

pub async fn create_manual_service(
    State(state): State<DaemonState>,
    Json(new): Json<NewManualService>,
) -> ApiResult<(StatusCode, Json<ManualService>)> {
    let entry = state.stores().manual_services.create(new).await?;
    state
        .bus()
        .publish(CatalogEvent::ServiceUpdated(Service::from(&entry)));
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn update_manual_service(
    State(state): State<DaemonState>,
    Path(id): Path<String>,
    Json(patch): Json<ManualServicePatch>,
) -> ApiResult<Json<ManualService>> {
    let entry = state
        .stores()
        .manual_services
        .update(&id, patch)
        .await?
        .ok_or(ApiError::NotFound)?;
    state
        .bus()
        .publish(CatalogEvent::ServiceUpdated(Service::from(&entry)));
    Ok(Json(entry))
}

pub async fn delete_manual_service(
    State(state): State<DaemonState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    if !state.stores().manual_services.delete(&id).await? {
        return Err(ApiError::NotFound);
    }
    state.bus().publish(CatalogEvent::ServiceRemoved { id });
    Ok(Json(json!({ "ok": true })))
}
