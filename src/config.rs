//! Configuration Module
//!
//! Loads node configuration from a TOML file, then applies environment
//! variable overrides. Both the store and the router binaries read the same
//! layout; each only looks at the sections it needs.

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

/// Environment variable naming an explicit config file path.
pub const CONFIG_PATH_VAR: &str = "SHARDKV_CONFIG";

/// Floor for `timeout_gc`; a zero pause would hold the write lock back to back.
const MIN_GC_INTERVAL_SECS: u64 = 1;

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Full node configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub options: OptionsConfig,
    pub cluster: ClusterConfig,
}

/// HTTP bind settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3090,
        }
    }
}

/// Store node options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OptionsConfig {
    /// Seconds between sweep passes
    pub timeout_gc: u64,
    /// Skip spawning the sweep task entirely
    pub disabled_gc: bool,
    /// Worker tasks per key-filter call
    pub filter_keys_workers: usize,
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            timeout_gc: 1,
            disabled_gc: false,
            filter_keys_workers: 4,
        }
    }
}

/// Router node options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// Ordered store addresses (`host:port`); the order fixes shard indices
    pub store_list: Vec<String>,
    /// Seconds to wait before the first stat crawl
    pub stat_crawler_timeout: u64,
    /// Seconds between stat crawls after the first; 0 crawls once
    pub stat_refresh_interval: u64,
    /// Max concurrent probes per fan-out call; 0 means one task per store
    pub fanout_limit: usize,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            store_list: Vec::new(),
            stat_crawler_timeout: 5,
            stat_refresh_interval: 0,
            fanout_limit: 0,
        }
    }
}

impl Config {
    /// Loads the config for a binary.
    ///
    /// The file is `$SHARDKV_CONFIG` if set, else `<binary_name>.toml` in the
    /// working directory. A missing file falls back to defaults; an
    /// unreadable or malformed one is an error. Environment overrides are
    /// applied last.
    ///
    /// # Environment Variables
    /// - `SERVER_HOST` / `SERVER_PORT` - bind address
    /// - `GC_INTERVAL` - sweep interval in seconds
    /// - `GC_DISABLED` - `true` to disable the sweep
    /// - `FILTER_WORKERS` - key-filter pool size
    /// - `STORE_LIST` - comma separated store addresses
    pub fn load(binary_name: &str) -> Result<Self, ConfigError> {
        let path = env::var(CONFIG_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(format!("{}.toml", binary_name)));

        let mut config = if path.exists() {
            Self::from_file(&path)?
        } else {
            warn!("Config file '{}' not found, using defaults", path.display());
            Self::default()
        };
        config.apply_env();
        Ok(config)
    }

    /// Parses a TOML config file without applying overrides.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parses TOML text.
    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    fn apply_env(&mut self) {
        if let Ok(host) = env::var("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = env_parse("SERVER_PORT") {
            self.server.port = port;
        }
        if let Some(interval) = env_parse("GC_INTERVAL") {
            self.options.timeout_gc = interval;
        }
        if let Some(disabled) = env_parse("GC_DISABLED") {
            self.options.disabled_gc = disabled;
        }
        if let Some(workers) = env_parse("FILTER_WORKERS") {
            self.options.filter_keys_workers = workers;
        }
        if let Ok(list) = env::var("STORE_LIST") {
            self.cluster.store_list = list
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }
    }

    /// `host:port` string to bind the HTTP listener on.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Pause between sweep passes, never shorter than one second.
    pub fn gc_interval(&self) -> Duration {
        Duration::from_secs(self.options.timeout_gc.max(MIN_GC_INTERVAL_SECS))
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server.port, 3090);
        assert_eq!(config.options.timeout_gc, 1);
        assert!(!config.options.disabled_gc);
        assert_eq!(config.options.filter_keys_workers, 4);
        assert!(config.cluster.store_list.is_empty());
        assert_eq!(config.cluster.stat_refresh_interval, 0);
    }

    #[test]
    fn test_config_from_toml_full() {
        let config = Config::from_toml(
            r#"
            [server]
            host = "127.0.0.1"
            port = 4000

            [options]
            timeout_gc = 10
            disabled_gc = true
            filter_keys_workers = 8

            [cluster]
            store_list = ["127.0.0.1:4001", "127.0.0.1:4002"]
            stat_crawler_timeout = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.bind_addr(), "127.0.0.1:4000");
        assert_eq!(config.gc_interval(), Duration::from_secs(10));
        assert!(config.options.disabled_gc);
        assert_eq!(config.options.filter_keys_workers, 8);
        assert_eq!(config.cluster.store_list.len(), 2);
        assert_eq!(config.cluster.stat_crawler_timeout, 2);
        assert_eq!(config.cluster.fanout_limit, 0);
    }

    #[test]
    fn test_zero_gc_interval_is_clamped() {
        let config = Config::from_toml("[options]\ntimeout_gc = 0\n").unwrap();
        assert_eq!(config.options.timeout_gc, 0);
        assert_eq!(config.gc_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_config_partial_toml_keeps_defaults() {
        let config = Config::from_toml("[server]\nport = 5000\n").unwrap();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.options.filter_keys_workers, 4);
    }

    #[test]
    fn test_config_invalid_toml() {
        assert!(Config::from_toml("[server]\nport = \"not a port\"\n").is_err());
    }

    #[test]
    fn test_config_missing_file_is_read_error() {
        let result = Config::from_file(Path::new("/nonexistent/shardkv.toml"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
