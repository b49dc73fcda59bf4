//! Door configuration loaded from `timed-door.toml`.
//!
//! Missing files or keys fall back to defaults. The `TIMED_DOOR_TIMEOUT`
//! environment variable takes precedence over the file for the timeout.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// File looked up in the working directory by [`DoorConfig::load`].
pub const CONFIG_FILE: &str = "timed-door.toml";

/// Environment variable overriding [`DoorConfig::timeout_secs`].
pub const TIMEOUT_ENV: &str = "TIMED_DOOR_TIMEOUT";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DoorConfig {
    /// Seconds a door may stay open before the alarm fires.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Seconds the demo keeps the door open before locking it.
    #[serde(default = "default_hold_secs")]
    pub hold_secs: u64,
}

fn default_timeout_secs() -> u64 {
    4
}

fn default_hold_secs() -> u64 {
    2
}

impl Default for DoorConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            hold_secs: default_hold_secs(),
        }
    }
}

impl DoorConfig {
    /// Load `timed-door.toml` from the current directory and apply the
    /// environment override.
    pub fn load() -> Result<Self> {
        let config = Self::load_from(Path::new(CONFIG_FILE))?;
        Ok(config.with_env_override(std::env::var(TIMEOUT_ENV).ok().as_deref()))
    }

    /// Load from `path`, or defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config = toml::from_str::<DoorConfig>(&contents)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Replace the timeout with `value` when it is a positive integer.
    pub fn with_env_override(mut self, value: Option<&str>) -> Self {
        if let Some(raw) = value
            && let Ok(secs) = raw.trim().parse::<u64>()
            && secs > 0
        {
            self.timeout_secs = secs;
        }
        self
    }
}
