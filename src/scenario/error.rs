//! Scenario error types.

use std::path::PathBuf;

use crate::audit::AuditConfigError;

/// Errors that can occur while loading a scenario.
#[derive(thiserror::Error, Debug)]
pub enum ScenarioError {
    /// Failed to read the scenario file.
    #[error("Failed to read scenario {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the scenario file.
    #[error("Failed to parse scenario {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The form's audit settings are invalid.
    #[error("Invalid audit settings: {0}")]
    AuditConfig(#[from] AuditConfigError),

    /// The scenario has nothing to replay.
    #[error("Scenario has no steps")]
    NoSteps,
}
