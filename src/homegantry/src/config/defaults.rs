use crate::config::Config;
use crate::constants::{
    DEFAULT_BIND_ADDRESS, DEFAULT_DATA_DIR, DEFAULT_DOCKER_SOCKET, DEFAULT_LOG_LEVEL, DEFAULT_PORT,
    DEFAULT_POLL_INTERVAL_SECS, DEFAULT_TITLE, RECONNECT_INITIAL_MS, RECONNECT_MAX_MS,
};
use std::path::PathBuf;

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            host: String::new(),
            title: DEFAULT_TITLE.to_string(),
            docker_socket: DEFAULT_DOCKER_SOCKET.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL_SECS,
            show_stopped: false,
            homepage_compat: true,
            exclude_self: true,
            compose_only: false,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            known_services_file: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_file: None,
            reconnect_initial_ms: RECONNECT_INITIAL_MS,
            reconnect_max_ms: RECONNECT_MAX_MS,
        }
    }
}
