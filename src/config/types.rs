//! Configuration types.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::location::LocationPriority;

/// Location request settings used when the form does not dictate its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoordinatorSettings {
    /// Priority requested when the form does not audit location.
    #[serde(default)]
    pub default_priority: LocationPriority,
    /// Desired update interval in seconds.
    #[serde(default = "default_update_interval_secs")]
    pub update_interval_secs: u64,
    /// Fastest accepted update interval in seconds.
    #[serde(default = "default_fastest_interval_secs")]
    pub fastest_interval_secs: u64,
}

fn default_update_interval_secs() -> u64 {
    20
}

fn default_fastest_interval_secs() -> u64 {
    10
}

impl Default for CoordinatorSettings {
    fn default() -> Self {
        Self {
            default_priority: LocationPriority::default(),
            update_interval_secs: default_update_interval_secs(),
            fastest_interval_secs: default_fastest_interval_secs(),
        }
    }
}

impl CoordinatorSettings {
    #[must_use]
    pub fn update_interval(&self) -> Duration {
        Duration::from_secs(self.update_interval_secs)
    }

    #[must_use]
    pub fn fastest_interval(&self) -> Duration {
        Duration::from_secs(self.fastest_interval_secs)
    }
}

/// How the CLI renders results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Emit JSON instead of colored text.
    #[serde(default)]
    pub json: bool,
}

/// Top-level configuration file contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub location: CoordinatorSettings,
    #[serde(default)]
    pub output: OutputConfig,
}
