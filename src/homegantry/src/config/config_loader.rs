use crate::catalog::ScanOptions;
use crate::constants::{
    DEFAULT_BIND_ADDRESS, DEFAULT_DATA_DIR, DEFAULT_DOCKER_SOCKET, DEFAULT_LOG_LEVEL, DEFAULT_PORT,
    DEFAULT_POLL_INTERVAL_SECS, DEFAULT_TITLE, ENV_PREFIX, RECONNECT_INITIAL_MS, RECONNECT_MAX_MS,
};
use crate::service_identification::MatchOptions;
use crate::storage::DashboardSettings;
use crate::watcher::BackoffOptions;
use anyhow::{bail, Context, Result};
use config::{Config as RConfig, Environment, File};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Config {
    pub port: u16,
    pub bind_address: String,
    /// Host used in synthesized URLs; empty means `localhost`.
    pub host: String,
    pub title: String,
    pub docker_socket: String,
    /// Seconds between periodic full scans.
    pub poll_interval: u64,
    pub show_stopped: bool,
    pub homepage_compat: bool,
    pub exclude_self: bool,
    pub compose_only: bool,
    pub data_dir: PathBuf,
    pub known_services_file: Option<PathBuf>,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
    pub reconnect_initial_ms: u64,
    pub reconnect_max_ms: u64,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval == 0 {
            bail!("poll_interval must be at least 1 second");
        }
        if self.reconnect_initial_ms == 0 {
            bail!("reconnect_initial_ms must be greater than 0");
        }
        if self.reconnect_initial_ms > self.reconnect_max_ms {
            bail!(
                "reconnect_initial_ms ({}) must not exceed reconnect_max_ms ({})",
                self.reconnect_initial_ms,
                self.reconnect_max_ms
            );
        }
        self.listen_addr()?;
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .bind_address
            .parse()
            .with_context(|| format!("invalid bind_address {:?}", self.bind_address))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval)
    }

    pub fn match_options(&self) -> MatchOptions {
        MatchOptions {
            homepage_compat: self.homepage_compat,
            host: self.host.clone(),
        }
    }

    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            include_stopped: self.show_stopped,
            exclude_self: self.exclude_self,
            compose_only: self.compose_only,
        }
    }

    pub fn backoff_options(&self) -> BackoffOptions {
        BackoffOptions {
            initial: Duration::from_millis(self.reconnect_initial_ms),
            max: Duration::from_millis(self.reconnect_max_ms),
        }
    }

    /// Settings used until the user saves their own.
    pub fn default_settings(&self) -> DashboardSettings {
        DashboardSettings::with_defaults(&self.title, self.show_stopped)
    }
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load_default_config() -> Result<Config> {
        Self::load(None)
    }

    /// Defaults, then the optional TOML file, then `HOMEGANTRY_*` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let mut builder = RConfig::builder();

        // set defaults
        builder = builder
            .set_default("port", DEFAULT_PORT)?
            .set_default("bind_address", DEFAULT_BIND_ADDRESS)?
            .set_default("host", "")?
            .set_default("title", DEFAULT_TITLE)?
            .set_default("docker_socket", DEFAULT_DOCKER_SOCKET)?
            .set_default("poll_interval", DEFAULT_POLL_INTERVAL_SECS)?
            .set_default("show_stopped", false)?
            .set_default("homepage_compat", true)?
            .set_default("exclude_self", true)?
            .set_default("compose_only", false)?
            .set_default("data_dir", DEFAULT_DATA_DIR)?
            .set_default("log_level", DEFAULT_LOG_LEVEL)?
            .set_default("reconnect_initial_ms", RECONNECT_INITIAL_MS)?
            .set_default("reconnect_max_ms", RECONNECT_MAX_MS)?;

        if let Some(path) = path {
            if !path.exists() {
                bail!("config file {} does not exist", path.display());
            }
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true));

        let config: Config = builder
            .build()?
            .try_deserialize()
            .context("failed to parse config")?;
        config.validate()?;

        Ok(config)
    }
}
