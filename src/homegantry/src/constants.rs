pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";
pub const DEFAULT_TITLE: &str = "HomeGantry";
pub const DEFAULT_DOCKER_SOCKET: &str = "/var/run/docker.sock";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;
pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const RECONNECT_INITIAL_MS: u64 = 1000;
pub const RECONNECT_MAX_MS: u64 = 30_000;

pub const ENV_PREFIX: &str = "HOMEGANTRY";

pub const FALLBACK_HOST: &str = "localhost";
pub const NO_URL: &str = "#";
pub const DEFAULT_CATEGORY: &str = "Other";
pub const RUNNING_STATE: &str = "running";

// first-party labels
pub const LABEL_URL: &str = "homegantry.url";
pub const LABEL_NAME: &str = "homegantry.name";
pub const LABEL_ICON: &str = "homegantry.icon";
pub const LABEL_CATEGORY: &str = "homegantry.category";
pub const LABEL_DESCRIPTION: &str = "homegantry.description";
pub const LABEL_EXCLUDE: &str = "homegantry.exclude";

// compatibility labels (gethomepage convention)
pub const COMPAT_LABEL_HREF: &str = "homepage.href";
pub const COMPAT_LABEL_NAME: &str = "homepage.name";
pub const COMPAT_LABEL_ICON: &str = "homepage.icon";
pub const COMPAT_LABEL_GROUP: &str = "homepage.group";
pub const COMPAT_LABEL_DESCRIPTION: &str = "homepage.description";

pub const COMPOSE_PROJECT_LABEL: &str = "com.docker.compose.project";
pub const COMPOSE_SERVICE_LABEL: &str = "com.docker.compose.service";

/// Images containing this marker are the daemon itself.
pub const SELF_IMAGE_MARKER: &str = "homegantry";

pub const OVERRIDES_FILE: &str = "overrides.json";
pub const MANUAL_SERVICES_FILE: &str = "manual-services.json";
pub const SETTINGS_FILE: &str = "settings.json";
pub const STACKS_FILE: &str = "stacks.json";

pub const EVENT_BUS_CAPACITY: usize = 256;
pub const SSE_KEEP_ALIVE_SECS: u64 = 30;
