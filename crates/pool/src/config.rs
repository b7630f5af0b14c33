//! Pool configuration
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `STACK_POOL_CAPACITY` | `0` | Nodes to reserve when the pool is created |
//!
//! ## TOML
//!
//! ```toml
//! initial_capacity = 4096
//! ```
//!
//! Every key is optional; unknown keys are rejected.

use crate::error::{PoolError, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Environment variable read by [`PoolConfig::from_env`]
pub const CAPACITY_ENV: &str = "STACK_POOL_CAPACITY";

/// Settings applied when a [`StackPool`](crate::StackPool) is created
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PoolConfig {
    /// Nodes to reserve up front (no nodes are created)
    pub initial_capacity: usize,
}

impl PoolConfig {
    /// Default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of nodes to reserve
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Load configuration from environment variables
    ///
    /// Missing or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        let initial_capacity = std::env::var(CAPACITY_ENV)
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(0);

        Self { initial_capacity }
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| PoolError::Config(format!("failed to parse pool config: {}", e)))
    }

    /// Read and parse a TOML configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| PoolError::Config(format!("failed to read {}: {}", path.display(), e)))?;
        let config = Self::from_toml_str(&content)?;
        debug!(
            path = %path.display(),
            initial_capacity = config.initial_capacity,
            "loaded pool config"
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    // Helper to set env var (tests touching the environment run #[serial])
    unsafe fn set_env(key: &str, value: &str) {
        // SAFETY: caller runs under #[serial]
        unsafe { std::env::set_var(key, value) };
    }

    // Helper to restore env var (tests touching the environment run #[serial])
    unsafe fn restore_env(key: &str, orig: Option<String>) {
        // SAFETY: caller runs under #[serial]
        unsafe {
            match orig {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }
    }

    #[test]
    fn test_config_defaults() {
        let config = PoolConfig::default();
        assert_eq!(config.initial_capacity, 0);
        assert_eq!(PoolConfig::new(), config);
        assert_eq!(
            PoolConfig::new().with_initial_capacity(64).initial_capacity,
            64
        );
    }

    #[test]
    fn test_from_toml_str() {
        let config = PoolConfig::from_toml_str("initial_capacity = 4096").unwrap();
        assert_eq!(config.initial_capacity, 4096);

        let empty = PoolConfig::from_toml_str("").unwrap();
        assert_eq!(empty, PoolConfig::default());
    }

    #[test]
    fn test_from_toml_str_rejects_bad_input() {
        assert!(matches!(
            PoolConfig::from_toml_str("initial_capacity = -1"),
            Err(PoolError::Config(_))
        ));
        assert!(matches!(
            PoolConfig::from_toml_str("capacity = 10"),
            Err(PoolError::Config(_))
        ));
        assert!(matches!(
            PoolConfig::from_toml_str("initial_capacity = \"lots\""),
            Err(PoolError::Config(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# pool sizing").unwrap();
        writeln!(file, "initial_capacity = 128").unwrap();

        let config = PoolConfig::from_file(file.path()).unwrap();
        assert_eq!(config.initial_capacity, 128);
    }

    #[test]
    fn test_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = PoolConfig::from_file(dir.path().join("missing.toml")).unwrap_err();
        match err {
            PoolError::Config(msg) => assert!(msg.contains("missing.toml")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_from_env() {
        let orig = std::env::var(CAPACITY_ENV).ok();

        // SAFETY: test is #[serial]
        unsafe {
            set_env(CAPACITY_ENV, "512");
        }
        assert_eq!(PoolConfig::from_env().initial_capacity, 512);

        // SAFETY: test is #[serial]
        unsafe {
            set_env(CAPACITY_ENV, " 7 ");
        }
        assert_eq!(PoolConfig::from_env().initial_capacity, 7);

        // SAFETY: test is #[serial]
        unsafe {
            restore_env(CAPACITY_ENV, orig);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_invalid_values() {
        let orig = std::env::var(CAPACITY_ENV).ok();

        // SAFETY: test is #[serial]
        unsafe {
            set_env(CAPACITY_ENV, "not-a-number");
        }
        assert_eq!(PoolConfig::from_env().initial_capacity, 0);

        // SAFETY: test is #[serial]
        unsafe {
            restore_env(CAPACITY_ENV, None);
        }
        assert_eq!(PoolConfig::from_env().initial_capacity, 0);

        // SAFETY: test is #[serial]
        unsafe {
            restore_env(CAPACITY_ENV, orig);
        }
    }
}
