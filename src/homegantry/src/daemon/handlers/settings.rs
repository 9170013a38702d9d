use crate::daemon::error::ApiResult;
use crate::daemon::state::DaemonState;
use crate::storage::{DashboardSettings, SettingsPatch};
use crate::types::CatalogEvent;
use axum::extract::State;
use axum::Json;

pub const SETTINGS_ENDPOINT: &str = "/api/settings";

pub async fn get_settings(State(state): State<DaemonState>) -> Json<DashboardSettings> {
    Json(DashboardSettings::clone(&*state.stores().settings.get().await))
}

pub async fn patch_settings(
    State(state): State<DaemonState>,
    Json(patch): Json<SettingsPatch>,
) -> ApiResult<Json<DashboardSettings>> {
    let settings = state.stores().settings.patch(patch).await?;
    state
        .bus()
        .publish(CatalogEvent::SettingsUpdated(settings.clone()));
    Ok(Json(settings))
}
