/// Main configuration module.
///
/// Submodules hold the compile-time defaults; `AppConfig` applies the
/// environment overrides on top of them once at startup.
pub mod server;
pub mod store;

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use log::warn;

use crate::store::ReloadPolicy;

pub const ENV_GRIDS_PATH: &str = "MAZE_GRIDS_PATH";
pub const ENV_BIND_HOST: &str = "MAZE_BIND_HOST";
pub const ENV_BIND_PORT: &str = "MAZE_BIND_PORT";
pub const ENV_RELOAD: &str = "MAZE_RELOAD";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub grids_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub reload: ReloadPolicy,
    pub request_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            grids_path: PathBuf::from(store::GRIDS_PATH),
            host: server::BIND_HOST.to_string(),
            port: server::BIND_PORT,
            reload: store::RELOAD_POLICY,
            request_timeout: Duration::from_secs(server::REQUEST_TIMEOUT_SECS),
        }
    }
}

impl AppConfig {
    /// Defaults overridden by the `MAZE_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    /// Empty or unparsable values keep the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(path) = value(ENV_GRIDS_PATH) {
            config.grids_path = PathBuf::from(path);
        }
        if let Some(host) = value(ENV_BIND_HOST) {
            config.host = host;
        }
        if let Some(port) = parse_or_warn(ENV_BIND_PORT, value(ENV_BIND_PORT)) {
            config.port = port;
        }
        if let Some(reload) = parse_or_warn(ENV_RELOAD, value(ENV_RELOAD)) {
            config.reload = reload;
        }
        config
    }
}

fn parse_or_warn<T>(key: &str, raw: Option<String>) -> Option<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = raw?;
    match raw.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            warn!("[Config] Ignoring {}={:?}: {}", key, raw, e);
            None
        }
    }
}
