//! # Configuration Management
//!
//! Environment-aware configuration for the coordination core. Values come from an
//! optional YAML file merged with environment overrides, and are validated before
//! any coordination work starts. All timing knobs used by the leader lock live
//! here so tests can shrink them without touching production code paths.

use crate::constants::lock;
use crate::error::{CoordinationError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Environment variable overriding the coordination-service endpoint.
pub const ENDPOINT_ENV_VAR: &str = "HELMSMAN_COORDINATION_ENDPOINT";

/// Top-level configuration for the scheduler coordination core.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Name of the service this scheduler instance manages.
    pub service_name: String,
    pub locker: LockerConfig,
    pub driver: DriverConfig,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            service_name: "default".to_string(),
            locker: LockerConfig::default(),
            driver: DriverConfig::default(),
        }
    }
}

/// Leader-lock configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LockerConfig {
    /// Escape hatch for unit tests of components that internally take the leader
    /// lock. When false, acquisition returns a no-op guard immediately.
    pub enabled: bool,
    /// Coordination-service connection string, e.g. `coordinator.cluster:2181`.
    pub endpoint: String,
    /// Acquisition attempts before escalating to fatal exit.
    pub attempts: u32,
    /// How long each acquisition attempt blocks, in milliseconds.
    pub attempt_timeout_ms: u64,
    pub retry: RetryConfig,
}

impl Default for LockerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "127.0.0.1:2181".to_string(),
            attempts: lock::LOCK_ATTEMPTS,
            attempt_timeout_ms: lock::LOCK_ATTEMPT_TIMEOUT.as_millis() as u64,
            retry: RetryConfig::default(),
        }
    }
}

impl LockerConfig {
    pub fn attempt_timeout(&self) -> Duration {
        Duration::from_millis(self.attempt_timeout_ms)
    }
}

/// Bounded exponential backoff applied by the coordination client between
/// connection retries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
    pub max_retries: u32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            base_delay_ms: 1000,
            max_delay_ms: 30_000,
            max_retries: 10,
        }
    }
}

/// Control-loop configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Interval between periodic aggregate-status reads, in milliseconds.
    pub status_check_interval_ms: u64,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            status_check_interval_ms: 1000,
        }
    }
}

impl DriverConfig {
    pub fn status_check_interval(&self) -> Duration {
        Duration::from_millis(self.status_check_interval_ms)
    }
}

impl CoreConfig {
    /// Load configuration from a YAML file, then apply environment overrides and
    /// validate.
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            CoordinationError::Configuration(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;
        let mut config: CoreConfig = serde_yaml::from_str(&contents).map_err(|e| {
            CoordinationError::Configuration(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })?;
        config.apply_env_overrides();
        config.validate()?;
        debug!(
            "Configuration loaded successfully: {}",
            serde_json::to_string_pretty(&config)
                .unwrap_or_else(|_| "[serialization error]".to_string())
        );
        Ok(config)
    }

    /// Defaults plus environment overrides, validated. For processes run without
    /// a config file.
    pub fn from_env() -> Result<Self> {
        let mut config = CoreConfig::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV_VAR) {
            self.locker.endpoint = endpoint;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.service_name.is_empty() {
            return Err(CoordinationError::Configuration(
                "service_name must not be empty".to_string(),
            ));
        }
        if self.locker.endpoint.is_empty() {
            return Err(CoordinationError::Configuration(
                "locker.endpoint must not be empty".to_string(),
            ));
        }
        if self.locker.attempts == 0 {
            return Err(CoordinationError::Configuration(
                "locker.attempts must be at least 1".to_string(),
            ));
        }
        if self.locker.attempt_timeout_ms == 0 {
            return Err(CoordinationError::Configuration(
                "locker.attempt_timeout_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_lock_budget() {
        let config = CoreConfig::default();
        assert!(config.locker.enabled);
        assert_eq!(config.locker.attempts, 3);
        assert_eq!(config.locker.attempt_timeout(), Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_yaml_round_trip_with_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "service_name: hdfs\nlocker:\n  endpoint: coordinator.cluster:2181\n  attempt_timeout_ms: 50\n"
        )
        .unwrap();

        let config = CoreConfig::from_yaml_file(file.path()).unwrap();
        assert_eq!(config.service_name, "hdfs");
        assert_eq!(config.locker.endpoint, "coordinator.cluster:2181");
        assert_eq!(config.locker.attempt_timeout(), Duration::from_millis(50));
        // Unspecified fields keep their defaults.
        assert_eq!(config.locker.attempts, 3);
        assert_eq!(config.driver.status_check_interval_ms, 1000);
    }

    #[test]
    fn test_config_serializes_for_logging() {
        let config = CoreConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        assert!(json.contains("\"attempts\": 3"));
        assert!(json.contains("\"enabled\": true"));
    }

    #[test]
    fn test_validation_rejects_zero_attempts() {
        let mut config = CoreConfig::default();
        config.locker.attempts = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_empty_service_name() {
        let mut config = CoreConfig::default();
        config.service_name = String::new();
        assert!(config.validate().is_err());
    }
}
