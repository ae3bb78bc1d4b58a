//! Audit event and per-form audit configuration types.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::AuditConfigError;
use crate::location::LocationPriority;

/// Background location transition recorded in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditEventType {
    /// Device location services layer is missing or unusable.
    GooglePlayServicesNotAvailable,
    /// User preference for background location is off.
    LocationTrackingDisabled,
    /// User preference for background location was turned back on.
    LocationTrackingEnabled,
    /// Location permission was refused or revoked.
    LocationPermissionsNotGranted,
    /// Location permission was granted.
    LocationPermissionsGranted,
    /// At least one location provider became enabled.
    LocationProvidersEnabled,
    /// All location providers became disabled.
    LocationProvidersDisabled,
}

impl AuditEventType {
    /// Returns the string representation used in audit output.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GooglePlayServicesNotAvailable => "google_play_services_not_available",
            Self::LocationTrackingDisabled => "location_tracking_disabled",
            Self::LocationTrackingEnabled => "location_tracking_enabled",
            Self::LocationPermissionsNotGranted => "location_permissions_not_granted",
            Self::LocationPermissionsGranted => "location_permissions_granted",
            Self::LocationProvidersEnabled => "location_providers_enabled",
            Self::LocationProvidersDisabled => "location_providers_disabled",
        }
    }
}

impl fmt::Display for AuditEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Location collection mode declared by a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuditMode {
    HighAccuracy,
    Balanced,
    LowPower,
    NoPower,
}

impl AuditMode {
    /// Location request priority corresponding to this mode.
    #[must_use]
    pub fn priority(&self) -> LocationPriority {
        match self {
            Self::HighAccuracy => LocationPriority::HighAccuracy,
            Self::Balanced => LocationPriority::Balanced,
            Self::LowPower => LocationPriority::LowPower,
            Self::NoPower => LocationPriority::NoPower,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HighAccuracy => "high-accuracy",
            Self::Balanced => "balanced",
            Self::LowPower => "low-power",
            Self::NoPower => "no-power",
        }
    }
}

impl FromStr for AuditMode {
    type Err = AuditConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high-accuracy" => Ok(Self::HighAccuracy),
            "balanced" => Ok(Self::Balanced),
            "low-power" => Ok(Self::LowPower),
            "no-power" => Ok(Self::NoPower),
            _ => Err(AuditConfigError::UnknownMode(s.to_string())),
        }
    }
}

/// Audit settings declared by the current form. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuditConfig {
    mode: Option<AuditMode>,
    min_interval: Option<Duration>,
    max_age: Option<Duration>,
    tracking_changes_enabled: bool,
    identify_user_enabled: bool,
    track_changes_reason_enabled: bool,
}

impl AuditConfig {
    /// Create a new builder with nothing enabled.
    #[must_use]
    pub fn builder() -> AuditConfigBuilder {
        AuditConfigBuilder::default()
    }

    #[must_use]
    pub fn mode(&self) -> Option<AuditMode> {
        self.mode
    }

    /// Minimum time between location updates.
    #[must_use]
    pub fn min_interval(&self) -> Option<Duration> {
        self.min_interval
    }

    /// Oldest fix age the audit log will still accept.
    #[must_use]
    pub fn max_age(&self) -> Option<Duration> {
        self.max_age
    }

    /// Whether the form asks for location to be audited at all.
    #[must_use]
    pub fn is_location_enabled(&self) -> bool {
        self.mode.is_some() && self.min_interval.is_some() && self.max_age.is_some()
    }

    #[must_use]
    pub fn location_priority(&self) -> Option<LocationPriority> {
        self.mode.map(|mode| mode.priority())
    }

    #[must_use]
    pub fn is_tracking_changes_enabled(&self) -> bool {
        self.tracking_changes_enabled
    }

    #[must_use]
    pub fn is_identify_user_enabled(&self) -> bool {
        self.identify_user_enabled
    }

    #[must_use]
    pub fn is_track_changes_reason_enabled(&self) -> bool {
        self.track_changes_reason_enabled
    }
}

/// Builder for [`AuditConfig`].
#[derive(Debug, Clone, Default)]
pub struct AuditConfigBuilder {
    mode: Option<AuditMode>,
    min_interval: Option<Duration>,
    max_age: Option<Duration>,
    tracking_changes_enabled: bool,
    identify_user_enabled: bool,
    track_changes_reason_enabled: bool,
}

impl AuditConfigBuilder {
    #[must_use]
    pub fn mode(mut self, mode: AuditMode) -> Self {
        self.mode = Some(mode);
        self
    }

    #[must_use]
    pub fn min_interval(mut self, interval: Duration) -> Self {
        self.min_interval = Some(interval);
        self
    }

    #[must_use]
    pub fn max_age(mut self, max_age: Duration) -> Self {
        self.max_age = Some(max_age);
        self
    }

    #[must_use]
    pub fn tracking_changes(mut self, enabled: bool) -> Self {
        self.tracking_changes_enabled = enabled;
        self
    }

    #[must_use]
    pub fn identify_user(mut self, enabled: bool) -> Self {
        self.identify_user_enabled = enabled;
        self
    }

    #[must_use]
    pub fn track_changes_reason(mut self, enabled: bool) -> Self {
        self.track_changes_reason_enabled = enabled;
        self
    }

    /// Build the config.
    ///
    /// # Errors
    ///
    /// Returns an error if location auditing is only partly configured or the
    /// minimum interval is zero.
    pub fn build(self) -> Result<AuditConfig, AuditConfigError> {
        let location_fields = [
            self.mode.is_some(),
            self.min_interval.is_some(),
            self.max_age.is_some(),
        ];
        if location_fields.iter().any(|set| *set) && !location_fields.iter().all(|set| *set) {
            return Err(AuditConfigError::IncompleteLocation);
        }
        if self.min_interval.is_some_and(|interval| interval.is_zero()) {
            return Err(AuditConfigError::ZeroMinInterval);
        }

        Ok(AuditConfig {
            mode: self.mode,
            min_interval: self.min_interval,
            max_age: self.max_age,
            tracking_changes_enabled: self.tracking_changes_enabled,
            identify_user_enabled: self.identify_user_enabled,
            track_changes_reason_enabled: self.track_changes_reason_enabled,
        })
    }
}
