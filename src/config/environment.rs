use std::env;
use std::path::PathBuf;
use std::time::Duration;

use super::services::{default_ports, default_services, ServiceSpec};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a non-negative integer, got `{value}`")]
    InvalidNumber { key: &'static str, value: String },

    #[error("{0} must be at least 1")]
    Zero(&'static str),

    #[error("Invalid entry `{entry}` in {key}")]
    InvalidEntry { key: &'static str, entry: String },

    #[error("{0} lists no entries")]
    Empty(&'static str),
}

/// Environment configuration
/// Loads and validates environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub compose_file: PathBuf,
    pub compose_project: Option<String>,
    pub services: Vec<ServiceSpec>,
    pub ports: Vec<String>,
    pub interval: Duration,
    pub max_attempts: u32,
    pub log_lines: u32,
    pub port_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let compose_file = get("PULSAR_COMPOSE_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("docker-compose.yml"));

        let compose_project = get("PULSAR_COMPOSE_PROJECT");

        let services = match get("PULSAR_SERVICES") {
            Some(raw) => parse_services(&raw)?,
            None => default_services(),
        };

        let ports = match get("PULSAR_PORTS") {
            Some(raw) => parse_ports(&raw)?,
            None => default_ports(),
        };

        let interval_secs = number("READINESS_INTERVAL_SECS", get("READINESS_INTERVAL_SECS"), 5)?;

        let max_attempts = count("READINESS_MAX_ATTEMPTS", get("READINESS_MAX_ATTEMPTS"), 30)?;
        let log_lines = count("DIAGNOSTIC_LOG_LINES", get("DIAGNOSTIC_LOG_LINES"), 50)?;

        let port_timeout_ms = number("PORT_CHECK_TIMEOUT_MS", get("PORT_CHECK_TIMEOUT_MS"), 2000)?;

        Ok(Self {
            compose_file,
            compose_project,
            services,
            ports,
            interval: Duration::from_secs(interval_secs),
            max_attempts,
            log_lines,
            port_timeout: Duration::from_millis(port_timeout_ms),
        })
    }

    pub fn containers(&self) -> Vec<String> {
        self.services.iter().map(|s| s.container.clone()).collect()
    }
}

fn number(key: &'static str, value: Option<String>, default: u64) -> Result<u64, ConfigError> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidNumber { key, value: raw.clone() }),
    }
}

/// Like `number`, but must fit in u32 and be at least 1
fn count(key: &'static str, value: Option<String>, default: u32) -> Result<u32, ConfigError> {
    let parsed = match value {
        None => default,
        Some(raw) => raw
            .trim()
            .parse::<u32>()
            .map_err(|_| ConfigError::InvalidNumber { key, value: raw.clone() })?,
    };
    if parsed == 0 {
        return Err(ConfigError::Zero(key));
    }
    Ok(parsed)
}

fn parse_list(key: &'static str, raw: &str) -> Result<Vec<String>, ConfigError> {
    let items: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if items.is_empty() {
        return Err(ConfigError::Empty(key));
    }
    Ok(items)
}

fn parse_services(raw: &str) -> Result<Vec<ServiceSpec>, ConfigError> {
    parse_list("PULSAR_SERVICES", raw)?
        .iter()
        .map(|entry| {
            ServiceSpec::parse(entry).ok_or_else(|| ConfigError::InvalidEntry {
                key: "PULSAR_SERVICES",
                entry: entry.clone(),
            })
        })
        .collect()
}

/// `host:port` entries; the port must be a valid u16
fn parse_ports(raw: &str) -> Result<Vec<String>, ConfigError> {
    let ports = parse_list("PULSAR_PORTS", raw)?;
    for entry in &ports {
        let valid = match entry.rsplit_once(':') {
            Some((host, port)) => !host.is_empty() && port.parse::<u16>().is_ok(),
            None => false,
        };
        if !valid {
            return Err(ConfigError::InvalidEntry {
                key: "PULSAR_PORTS",
                entry: entry.clone(),
            });
        }
    }
    Ok(ports)
}
