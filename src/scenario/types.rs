//! Scenario file types.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::audit::{AuditConfig, AuditConfigError, AuditMode};
use crate::context::SimulatedContext;
use crate::coordinator::Message;
use crate::location::Fix;

/// A scripted session: initial conditions plus an ordered list of steps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub device: DeviceSetup,
    #[serde(default)]
    pub form: FormSetup,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// Initial device predicates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceSetup {
    pub capability_available: bool,
    pub preference_enabled: bool,
    pub permission_granted: bool,
    pub providers_available: bool,
}

impl Default for DeviceSetup {
    fn default() -> Self {
        Self {
            capability_available: true,
            preference_enabled: true,
            permission_granted: true,
            providers_available: true,
        }
    }
}

/// Current form flags and audit settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormSetup {
    pub set: bool,
    pub collects_background_location: bool,
    pub audits_location: bool,
    pub audit: AuditSetup,
}

impl Default for FormSetup {
    fn default() -> Self {
        Self {
            set: true,
            collects_background_location: true,
            audits_location: true,
            audit: AuditSetup::default(),
        }
    }
}

/// Raw audit settings as written in a scenario file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditSetup {
    pub mode: Option<String>,
    pub min_interval_secs: Option<u64>,
    pub max_age_secs: Option<u64>,
    pub track_changes: bool,
    pub identify_user: bool,
    pub track_changes_reason: bool,
}

impl AuditSetup {
    /// Validate into an [`AuditConfig`].
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown mode or an invalid combination.
    pub fn to_config(&self) -> Result<AuditConfig, AuditConfigError> {
        let mut builder = AuditConfig::builder()
            .tracking_changes(self.track_changes)
            .identify_user(self.identify_user)
            .track_changes_reason(self.track_changes_reason);
        if let Some(mode) = &self.mode {
            builder = builder.mode(mode.parse::<AuditMode>()?);
        }
        if let Some(secs) = self.min_interval_secs {
            builder = builder.min_interval(Duration::from_secs(secs));
        }
        if let Some(secs) = self.max_age_secs {
            builder = builder.max_age(Duration::from_secs(secs));
        }
        builder.build()
    }
}

/// Partial update of device or form conditions mid-scenario.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConditionChange {
    pub capability_available: Option<bool>,
    pub preference_enabled: Option<bool>,
    pub permission_granted: Option<bool>,
    pub providers_available: Option<bool>,
    pub form_set: Option<bool>,
}

impl ConditionChange {
    /// Apply the context-side part of the change. Provider availability
    /// belongs to the location source and is handled by the runner.
    pub fn apply_to(&self, context: &mut SimulatedContext) {
        if let Some(value) = self.capability_available {
            context.capability_available = value;
        }
        if let Some(value) = self.preference_enabled {
            context.preference_enabled = value;
        }
        if let Some(value) = self.permission_granted {
            context.permission_granted = value;
        }
        if let Some(value) = self.form_set {
            context.form_set = value;
        }
    }
}

/// Assertions about coordinator state after the preceding steps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StateCheck {
    pub pending_permission_check: Option<bool>,
    pub monitoring: Option<bool>,
    /// Total audit events logged so far.
    pub events: Option<usize>,
    /// Total fixes forwarded so far.
    pub locations: Option<usize>,
}

/// One scripted event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    BeginFormSession,
    FormFinishedLoading,
    ActivityDisplayed {
        #[serde(default)]
        expect: Option<Message>,
    },
    ActivityHidden,
    LocationPermissionGranted {
        #[serde(default)]
        expect: Option<Message>,
    },
    LocationPermissionDenied,
    LocationPermissionChanged,
    BackgroundLocationPreferenceToggled,
    LocationProvidersChanged,
    /// The device produces a fix.
    Fix(Fix),
    /// Change conditions without notifying the coordinator.
    Set(ConditionChange),
    Check(StateCheck),
}

impl Step {
    #[must_use]
    pub fn action(&self) -> &'static str {
        match self {
            Self::BeginFormSession => "begin_form_session",
            Self::FormFinishedLoading => "form_finished_loading",
            Self::ActivityDisplayed { .. } => "activity_displayed",
            Self::ActivityHidden => "activity_hidden",
            Self::LocationPermissionGranted { .. } => "location_permission_granted",
            Self::LocationPermissionDenied => "location_permission_denied",
            Self::LocationPermissionChanged => "location_permission_changed",
            Self::BackgroundLocationPreferenceToggled => "background_location_preference_toggled",
            Self::LocationProvidersChanged => "location_providers_changed",
            Self::Fix(_) => "fix",
            Self::Set(_) => "set",
            Self::Check(_) => "check",
        }
    }
}
