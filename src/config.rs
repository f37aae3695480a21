use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Process configuration (environment)
// ---------------------------------------------------------------------------

pub const ENV_PORT: &str = "PORT";
pub const ENV_HOST: &str = "HOST";
pub const ENV_DEBUG: &str = "DASHBOARD_DEBUG";
pub const ENV_DATA: &str = "HURTOS_DATA";

pub const DEFAULT_PORT: u16 = 8050;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_DATA_PATH: &str = "Hurtos_marzo.csv";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name}={value:?} is not a valid port")]
    InvalidPort { name: &'static str, value: String },
    #[error("{name}={value:?} is not a boolean (use 1/0, true/false, yes/no)")]
    InvalidBool { name: &'static str, value: String },
}

/// Startup settings. Read once; nothing here changes while serving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub host: String,
    pub port: u16,
    /// Verbose logging and the `/debug/dataset` route.
    pub debug: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            debug: false,
        }
    }
}

fn parse_bool(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim() {
        "1" | "true" | "TRUE" | "True" | "yes" | "YES" => Ok(true),
        "0" | "false" | "FALSE" | "False" | "no" | "NO" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            name,
            value: value.to_string(),
        }),
    }
}

impl DashboardConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any key lookup; unset or blank keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut cfg = Self::default();

        if let Some(port) = get(ENV_PORT) {
            cfg.port = port
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort {
                    name: ENV_PORT,
                    value: port.clone(),
                })?;
        }
        if let Some(host) = get(ENV_HOST) {
            cfg.host = host.trim().to_string();
        }
        if let Some(debug) = get(ENV_DEBUG) {
            cfg.debug = parse_bool(ENV_DEBUG, &debug)?;
        }
        if let Some(path) = get(ENV_DATA) {
            cfg.data_path = PathBuf::from(path);
        }
        Ok(cfg)
    }

    /// Default `env_logger` filter when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "info"
        }
    }

    pub fn bind_display(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = DashboardConfig::from_lookup(lookup(&[])).expect("config");
        assert_eq!(cfg, DashboardConfig::default());
        assert_eq!(cfg.port, 8050);
        assert_eq!(cfg.bind_display(), "0.0.0.0:8050");
        assert_eq!(cfg.log_filter(), "info");
    }

    #[test]
    fn reads_overrides() {
        let cfg = DashboardConfig::from_lookup(lookup(&[
            ("PORT", "9000"),
            ("HOST", "127.0.0.1"),
            ("DASHBOARD_DEBUG", "yes"),
            ("HURTOS_DATA", "/data/hurtos.parquet"),
        ]))
        .expect("config");
        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.host, "127.0.0.1");
        assert!(cfg.debug);
        assert_eq!(cfg.data_path, PathBuf::from("/data/hurtos.parquet"));
        assert_eq!(cfg.log_filter(), "debug");
    }

    #[test]
    fn blank_values_keep_defaults() {
        let cfg = DashboardConfig::from_lookup(lookup(&[("PORT", "  ")])).expect("config");
        assert_eq!(cfg.port, DEFAULT_PORT);
    }

    #[test]
    fn bad_port_is_rejected() {
        let err = DashboardConfig::from_lookup(lookup(&[("PORT", "80a")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidPort {
                name: "PORT",
                value: "80a".to_string()
            }
        );
    }

    #[test]
    fn bad_debug_flag_is_rejected() {
        let err = DashboardConfig::from_lookup(lookup(&[("DASHBOARD_DEBUG", "maybe")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBool { .. }));
    }
}
