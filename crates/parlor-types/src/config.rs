//! Server configuration types for Parlor.
//!
//! `ServerConfig` represents the `config.toml` in the data directory that
//! controls the listen address and liveness sweep timing.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level configuration for the Parlor server.
///
/// Loaded from `~/.parlor/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind the HTTP listener to.
    #[serde(default = "default_port")]
    pub port: u16,

    /// How often the liveness sweeper runs, in seconds.
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,

    /// Maximum time since the last heartbeat before eviction, in seconds.
    #[serde(default = "default_stale_after_secs")]
    pub stale_after_secs: u64,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_sweep_interval_secs() -> u64 {
    15
}

fn default_stale_after_secs() -> u64 {
    10
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            sweep_interval_secs: default_sweep_interval_secs(),
            stale_after_secs: default_stale_after_secs(),
        }
    }
}

impl ServerConfig {
    /// Sweep poll interval, never shorter than one second.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs.max(1))
    }

    /// Staleness threshold, never shorter than one second.
    pub fn stale_after(&self) -> Duration {
        Duration::from_secs(self.stale_after_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_default_values() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 5000);
        assert_eq!(config.sweep_interval(), Duration::from_secs(15));
        assert_eq!(config.stale_after(), Duration::from_secs(10));
    }

    #[test]
    fn test_server_config_deserialize_with_defaults() {
        let config: ServerConfig = toml::from_str("").unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.sweep_interval_secs, 15);
    }

    #[test]
    fn test_server_config_deserialize_with_values() {
        let config: ServerConfig = toml::from_str(
            r#"
host = "0.0.0.0"
port = 8080
sweep_interval_secs = 5
stale_after_secs = 3
"#,
        )
        .unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.sweep_interval(), Duration::from_secs(5));
        assert_eq!(config.stale_after(), Duration::from_secs(3));
    }

    #[test]
    fn test_zero_durations_are_clamped() {
        let config = ServerConfig {
            sweep_interval_secs: 0,
            stale_after_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.sweep_interval(), Duration::from_secs(1));
        assert_eq!(config.stale_after(), Duration::from_secs(1));
    }
}
