use crate::daemon::state::DaemonState;
use crate::types::Service;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

pub const SERVICES_ENDPOINT: &str = "/api/services";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicesQuery {
    #[serde(default)]
    pub include_hidden: bool,
}

pub async fn list_services(
    State(state): State<DaemonState>,
    Query(query): Query<ServicesQuery>,
) -> Json<Vec<Service>> {
    Json(state.merged_services(query.include_hidden).await)
}
