//! Form and audit context consumed by the coordinator.

use crate::audit::{AuditConfig, AuditEventType, AuditTrail};
use crate::location::Fix;

/// Current-form flags, device predicates and the audit sink.
///
/// Implementations are injected into the coordinator; every predicate is
/// read live at the moment the coordinator needs it.
pub trait FormContext {
    /// Whether a form is currently open.
    fn is_current_form_set(&self) -> bool;

    /// Whether the open form wants background location collected.
    fn current_form_collects_background_location(&self) -> bool;

    /// Whether the open form audits location.
    fn current_form_audits_location(&self) -> bool;

    /// Audit settings of the open form.
    fn current_form_audit_config(&self) -> AuditConfig;

    /// Whether the device location services layer is usable.
    fn is_device_capability_available(&self) -> bool;

    /// Whether the user has background location turned on.
    fn is_background_location_preference_enabled(&self) -> bool;

    /// Whether the OS currently grants location permission.
    fn is_permission_granted(&self) -> bool;

    /// Record an audit event.
    fn log_audit_event(&mut self, event: AuditEventType);

    /// Hand a fix to the audit logger.
    fn provide_location_to_audit_logger(&mut self, fix: Fix);
}

/// A context whose predicates are plain fields, recording into an
/// [`AuditTrail`].
#[derive(Debug, Clone)]
pub struct SimulatedContext {
    pub form_set: bool,
    pub collects_background_location: bool,
    pub audits_location: bool,
    pub audit_config: AuditConfig,
    pub capability_available: bool,
    pub preference_enabled: bool,
    pub permission_granted: bool,
    trail: AuditTrail,
}

impl Default for SimulatedContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedContext {
    /// A device where everything is available and allowed, with an open form
    /// that collects and audits location.
    #[must_use]
    pub fn new() -> Self {
        Self {
            form_set: true,
            collects_background_location: true,
            audits_location: true,
            audit_config: AuditConfig::default(),
            capability_available: true,
            preference_enabled: true,
            permission_granted: true,
            trail: AuditTrail::new(),
        }
    }

    #[must_use]
    pub fn with_form_set(mut self, form_set: bool) -> Self {
        self.form_set = form_set;
        self
    }

    #[must_use]
    pub fn with_background_location(mut self, collects: bool) -> Self {
        self.collects_background_location = collects;
        self
    }

    #[must_use]
    pub fn with_location_audit(mut self, audits: bool) -> Self {
        self.audits_location = audits;
        self
    }

    #[must_use]
    pub fn with_audit_config(mut self, config: AuditConfig) -> Self {
        self.audit_config = config;
        self
    }

    /// Set whether the device location services layer is usable.
    #[must_use]
    pub fn with_capability(mut self, available: bool) -> Self {
        self.capability_available = available;
        self
    }

    #[must_use]
    pub fn with_preference(mut self, enabled: bool) -> Self {
        self.preference_enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_permission(mut self, granted: bool) -> Self {
        self.permission_granted = granted;
        self
    }

    #[must_use]
    pub fn trail(&self) -> &AuditTrail {
        &self.trail
    }

    pub fn trail_mut(&mut self) -> &mut AuditTrail {
        &mut self.trail
    }
}

impl FormContext for SimulatedContext {
    fn is_current_form_set(&self) -> bool {
        self.form_set
    }

    fn current_form_collects_background_location(&self) -> bool {
        self.form_set && self.collects_background_location
    }

    fn current_form_audits_location(&self) -> bool {
        self.form_set && self.audits_location
    }

    fn current_form_audit_config(&self) -> AuditConfig {
        self.audit_config.clone()
    }

    fn is_device_capability_available(&self) -> bool {
        self.capability_available
    }

    fn is_background_location_preference_enabled(&self) -> bool {
        self.preference_enabled
    }

    fn is_permission_granted(&self) -> bool {
        self.permission_granted
    }

    fn log_audit_event(&mut self, event: AuditEventType) {
        self.trail.record_event(event);
    }

    fn provide_location_to_audit_logger(&mut self, fix: Fix) {
        self.trail.record_location(fix);
    }
}
