//! Session state and edge detection for background location.

use serde::Serialize;

/// Result of observing a condition against its last known value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Same value as the previous observation.
    Unchanged,
    /// First observation this session.
    Initial(bool),
    /// Value flipped since the previous observation.
    Changed(bool),
}

impl Edge {
    /// Whether this observation moved the condition into `value`.
    #[must_use]
    pub fn entered(self, value: bool) -> bool {
        match self {
            Self::Unchanged => false,
            Self::Initial(v) | Self::Changed(v) => v == value,
        }
    }

    /// Whether the condition flipped from a known opposite value into `value`.
    #[must_use]
    pub fn flipped_to(self, value: bool) -> bool {
        self == Self::Changed(value)
    }
}

/// Last known value of a boolean precondition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConditionLatch {
    last: Option<bool>,
}

impl ConditionLatch {
    /// Record a fresh reading and report how it relates to the last one.
    pub fn observe(&mut self, value: bool) -> Edge {
        let edge = match self.last {
            None => Edge::Initial(value),
            Some(last) if last == value => Edge::Unchanged,
            Some(_) => Edge::Changed(value),
        };
        self.last = Some(value);
        edge
    }

    #[must_use]
    pub fn last(&self) -> Option<bool> {
        self.last
    }

    /// Whether the last reading was a known `false`.
    #[must_use]
    pub fn is_known_false(&self) -> bool {
        self.last == Some(false)
    }
}

/// What the coordinator knows about the OS location permission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionState {
    /// No grant or denial has been resolved this session.
    #[default]
    Undetermined,
    Granted,
    Denied,
}

/// Coarse phase derived from [`SessionState`], used for logging and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinatorPhase {
    /// No form has finished loading.
    Inactive,
    /// The loaded form does not collect background location.
    NotNeeded,
    /// Waiting on an external permission request.
    PendingPermission,
    /// Location updates are not requested.
    Stopped,
    /// Location updates are requested.
    Monitoring,
}

/// Mutable state of one tracked form session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionState {
    pub form_loaded: bool,
    pub collects_background_location: bool,
    pub activity_visible: bool,
    pub pending_permission_check: bool,
    /// Location updates are currently requested from the source.
    pub monitoring: bool,
    pub permission: PermissionState,
    pub capability: ConditionLatch,
    pub preference: ConditionLatch,
    pub providers: ConditionLatch,
}

impl SessionState {
    /// Whether lifecycle hooks should do anything for this session.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.form_loaded && self.collects_background_location
    }

    #[must_use]
    pub fn phase(&self) -> CoordinatorPhase {
        if !self.form_loaded {
            CoordinatorPhase::Inactive
        } else if !self.collects_background_location {
            CoordinatorPhase::NotNeeded
        } else if self.monitoring {
            CoordinatorPhase::Monitoring
        } else if self.pending_permission_check {
            CoordinatorPhase::PendingPermission
        } else {
            CoordinatorPhase::Stopped
        }
    }
}
