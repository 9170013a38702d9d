use crate::daemon::state::DaemonState;
use axum::extract::State;
use axum::Json;
use serde::Serialize;

pub const HEALTH_ENDPOINT: &str = "/api/health";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub docker: &'static str,
}

pub async fn health(State(state): State<DaemonState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        docker: if state.engine().is_connected() {
            "connected"
        } else {
            "disconnected"
        },
    })
}
