//! Location fix and request priority types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single location reading delivered by a location source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fix {
    /// Identifier of the provider that produced the reading (e.g. `gps`).
    pub provider: String,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Altitude in meters.
    #[serde(default)]
    pub altitude: f64,
    /// Horizontal accuracy radius in meters.
    #[serde(default)]
    pub accuracy: f32,
}

impl Fix {
    /// Create a fix with zero altitude and accuracy.
    pub fn new(provider: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            provider: provider.into(),
            latitude,
            longitude,
            altitude: 0.0,
            accuracy: 0.0,
        }
    }

    /// Set the altitude.
    #[must_use]
    pub fn with_altitude(mut self, altitude: f64) -> Self {
        self.altitude = altitude;
        self
    }

    /// Set the accuracy radius.
    #[must_use]
    pub fn with_accuracy(mut self, accuracy: f32) -> Self {
        self.accuracy = accuracy;
        self
    }
}

impl fmt::Display for Fix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({:.6}, {:.6}) alt={:.1}m acc={:.1}m",
            self.provider, self.latitude, self.longitude, self.altitude, self.accuracy
        )
    }
}

/// Power/accuracy trade-off requested from a location source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationPriority {
    HighAccuracy,
    #[default]
    Balanced,
    LowPower,
    NoPower,
}

impl LocationPriority {
    /// Returns the string representation used in configuration files.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HighAccuracy => "high_accuracy",
            Self::Balanced => "balanced",
            Self::LowPower => "low_power",
            Self::NoPower => "no_power",
        }
    }
}
