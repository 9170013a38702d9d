use crate::daemon::handlers::events::{events, EVENTS_ENDPOINT};
use crate::daemon::handlers::health::{health, HEALTH_ENDPOINT};
use crate::daemon::handlers::manual::{
    create_manual_service, delete_manual_service, update_manual_service, MANUAL_SERVICES_ENDPOINT,
    MANUAL_SERVICE_ENDPOINT,
};
use crate::daemon::handlers::overrides::{delete_override, put_override, OVERRIDE_ENDPOINT};
use crate::daemon::handlers::services::{list_services, SERVICES_ENDPOINT};
use crate::daemon::handlers::settings::{get_settings, patch_settings, SETTINGS_ENDPOINT};
use crate::daemon::handlers::stacks::{
    list_groups, list_stacks, put_stack, GROUPS_ENDPOINT, STACKS_ENDPOINT, STACK_ENDPOINT,
};
use crate::daemon::state::DaemonState;
use axum::routing::{get, post, put, MethodRouter};
use std::sync::LazyLock;

pub(super) static ROUTES: LazyLock<Vec<(&'static str, MethodRouter<DaemonState>)>> =
    LazyLock::new(|| {
        vec![
            (SERVICES_ENDPOINT, get(list_services)),
            (OVERRIDE_ENDPOINT, put(put_override).delete(delete_override)),
            (MANUAL_SERVICES_ENDPOINT, post(create_manual_service)),
            (
                MANUAL_SERVICE_ENDPOINT,
                put(update_manual_service).delete(delete_manual_service),
            ),
            (EVENTS_ENDPOINT, get(events)),
            (SETTINGS_ENDPOINT, get(get_settings).patch(patch_settings)),
            (STACKS_ENDPOINT, get(list_stacks)),
            (STACK_ENDPOINT, put(put_stack)),
            (GROUPS_ENDPOINT, get(list_groups)),
            (HEALTH_ENDPOINT, get(health)),
        ]
    });
