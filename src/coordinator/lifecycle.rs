//! Background location coordinator.
//!
//! Decides on every lifecycle or precondition-change event whether location
//! updates should be running, what the hosting screen should tell the user
//! and which audit events to record. All calls arrive on one logical
//! execution context; nothing here blocks or locks.

use std::time::Duration;

use crate::audit::{AuditConfig, AuditEventType};
use crate::config::CoordinatorSettings;
use crate::context::FormContext;
use crate::location::{Fix, FixChannel, LocationPriority, LocationSource};

use super::message::Message;
use super::state::{CoordinatorPhase, Edge, PermissionState, SessionState};

/// Coordinates background location capture for one form session at a time.
///
/// Owns the location source and is the only caller of its start/stop
/// methods. Audit events implied by a call are logged before the call
/// returns.
#[derive(Debug)]
pub struct BackgroundLocationCoordinator<C, L> {
    context: C,
    source: L,
    settings: CoordinatorSettings,
    state: SessionState,
    audit_config: Option<AuditConfig>,
    fixes: FixChannel,
}

impl<C: FormContext, L: LocationSource> BackgroundLocationCoordinator<C, L> {
    /// Create a coordinator with default request settings.
    #[must_use]
    pub fn new(context: C, source: L) -> Self {
        Self::with_settings(context, source, CoordinatorSettings::default())
    }

    #[must_use]
    pub fn with_settings(context: C, source: L, settings: CoordinatorSettings) -> Self {
        Self {
            context,
            source,
            settings,
            state: SessionState::default(),
            audit_config: None,
            fixes: FixChannel::new(),
        }
    }

    /// Discard all session state so the next form load starts clean.
    pub fn begin_form_session(&mut self) {
        self.stop_location_requests();
        self.state = SessionState::default();
        self.audit_config = None;
        // Listeners handed out earlier now feed a closed channel.
        self.fixes = FixChannel::new();
        tracing::debug!("Background location session reset");
    }

    /// Read the form-level flags once the form has loaded.
    ///
    /// Calling this again re-reads the flags but keeps the last known
    /// precondition values, so conditions already logged are not logged again.
    pub fn form_finished_loading(&mut self) {
        if !self.context.is_current_form_set() {
            tracing::debug!("Form load reported without a current form");
            let before = self.state.phase();
            self.state.form_loaded = false;
            self.state.collects_background_location = false;
            self.state.pending_permission_check = false;
            self.audit_config = None;
            self.stop_location_requests();
            self.trace_transition(before, "form_finished_loading");
            return;
        }

        let before = self.state.phase();
        self.state.form_loaded = true;
        self.state.collects_background_location =
            self.context.current_form_collects_background_location();
        self.audit_config = Some(self.context.current_form_audit_config());

        if !self.state.collects_background_location {
            self.state.pending_permission_check = false;
            self.stop_location_requests();
        }
        self.trace_transition(before, "form_finished_loading");
    }

    /// The hosting screen became visible.
    pub fn activity_displayed(&mut self) -> Message {
        self.state.activity_visible = true;
        if !self.state.is_active() {
            return Message::None;
        }

        let before = self.state.phase();
        let message = self.evaluate_preconditions();
        self.trace_transition(before, "activity_displayed");
        message
    }

    /// The hosting screen is no longer in the foreground.
    pub fn activity_hidden(&mut self) {
        let before = self.state.phase();
        self.state.activity_visible = false;
        self.stop_location_requests();
        self.trace_transition(before, "activity_hidden");
    }

    /// An external permission request resolved with a grant.
    pub fn location_permission_granted(&mut self) -> Message {
        if !self.state.is_active() {
            return Message::None;
        }

        let before = self.state.phase();
        let message = self.grant_permission();
        self.trace_transition(before, "location_permission_granted");
        message
    }

    /// An external permission request resolved with a denial.
    pub fn location_permission_denied(&mut self) {
        if !self.state.is_active() {
            return;
        }

        let before = self.state.phase();
        self.deny_permission();
        self.trace_transition(before, "location_permission_denied");
    }

    /// Reconcile with the OS permission, which may have changed while hidden.
    ///
    /// A newly gained permission is handled like a grant, but nothing is
    /// surfaced to the user.
    pub fn location_permission_changed(&mut self) {
        if !self.state.is_active() {
            return;
        }

        let before = self.state.phase();
        let granted = self.context.is_permission_granted();
        match (self.state.permission, granted) {
            (PermissionState::Granted, false) => self.deny_permission(),
            (PermissionState::Undetermined | PermissionState::Denied, true) => {
                let _ = self.grant_permission();
            }
            _ => {}
        }
        self.trace_transition(before, "location_permission_changed");
    }

    /// The background location preference may have been changed in settings.
    pub fn background_location_preference_toggled(&mut self) {
        if !self.state.is_active() {
            return;
        }

        let before = self.state.phase();
        if !self.context.is_background_location_preference_enabled() {
            self.observe_preference(false);
            self.state.pending_permission_check = false;
            self.stop_location_requests();
        } else if self.state.activity_visible {
            let _ = self.evaluate_preconditions();
        } else {
            self.observe_preference(true);
        }
        self.trace_transition(before, "background_location_preference_toggled");
    }

    /// The set of enabled location providers changed.
    pub fn location_providers_changed(&mut self) {
        if !self.state.is_active()
            || !self.state.monitoring
            || !self.context.current_form_audits_location()
        {
            return;
        }

        let available = self.source.is_location_available();
        self.observe_providers(available);
    }

    /// Forward a fix to the audit logger if collection is fully allowed.
    ///
    /// Returns whether the fix was forwarded. Dropped fixes are gone.
    pub fn on_location_changed(&mut self, fix: Fix) -> bool {
        if self.should_forward() {
            self.context.provide_location_to_audit_logger(fix);
            true
        } else {
            tracing::trace!(fix = %fix, "Dropping location fix");
            false
        }
    }

    /// Drain fixes delivered by the location source, returning how many were
    /// forwarded.
    pub fn pump_fixes(&mut self) -> usize {
        let mut forwarded = 0;
        while let Some(fix) = self.fixes.try_next() {
            if self.on_location_changed(fix) {
                forwarded += 1;
            }
        }
        forwarded
    }

    /// Whether the caller should launch the permission request flow.
    #[must_use]
    pub fn is_pending_permission_check(&self) -> bool {
        self.state.pending_permission_check
    }

    /// Whether location updates are currently requested.
    #[must_use]
    pub fn is_monitoring(&self) -> bool {
        self.state.monitoring
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> CoordinatorPhase {
        self.state.phase()
    }

    /// Audit settings read at the last form load.
    #[must_use]
    pub fn audit_config(&self) -> Option<&AuditConfig> {
        self.audit_config.as_ref()
    }

    #[must_use]
    pub fn last_location(&self) -> Option<Fix> {
        self.source.last_location()
    }

    #[must_use]
    pub fn settings(&self) -> &CoordinatorSettings {
        &self.settings
    }

    #[must_use]
    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    #[must_use]
    pub fn location_source(&self) -> &L {
        &self.source
    }

    pub fn location_source_mut(&mut self) -> &mut L {
        &mut self.source
    }

    /// Capability, then preference, then permission. Both of the first two
    /// are checked and logged even when the first already failed.
    fn evaluate_preconditions(&mut self) -> Message {
        let capability = self.context.is_device_capability_available();
        if self.state.capability.observe(capability).entered(false) {
            self.log_event(AuditEventType::GooglePlayServicesNotAvailable);
        }

        let preference = self.context.is_background_location_preference_enabled();
        self.observe_preference(preference);

        let blocked = if !capability {
            Some(Message::PlayServicesUnavailable)
        } else if !preference {
            Some(Message::LocationPrefDisabled)
        } else {
            None
        };
        if let Some(message) = blocked {
            self.state.pending_permission_check = false;
            self.stop_location_requests();
            return message;
        }

        match self.state.permission {
            PermissionState::Undetermined => {
                self.state.pending_permission_check = true;
                Message::None
            }
            PermissionState::Denied => Message::None,
            PermissionState::Granted => {
                if !self.context.is_permission_granted() {
                    tracing::debug!("Location permission lost since it was granted");
                    self.deny_permission();
                    return Message::None;
                }
                self.start_location_requests();
                self.provider_message()
                    .unwrap_or(Message::CollectingLocation)
            }
        }
    }

    fn grant_permission(&mut self) -> Message {
        let awaiting = self.state.pending_permission_check;
        if self.state.permission != PermissionState::Granted {
            self.state.permission = PermissionState::Granted;
            self.log_event(AuditEventType::LocationPermissionsGranted);
        }
        self.state.pending_permission_check = false;

        if self.state.capability.is_known_false() || self.state.preference.is_known_false() {
            tracing::debug!("Permission granted while collection preconditions are unmet");
            return Message::None;
        }
        // The request dialog itself hides the screen, so a pending request
        // may start collection while not visible.
        if !awaiting && !self.state.activity_visible {
            return Message::None;
        }

        self.start_location_requests();
        self.provider_message().unwrap_or(Message::None)
    }

    fn deny_permission(&mut self) {
        if self.state.permission != PermissionState::Denied {
            self.state.permission = PermissionState::Denied;
            self.log_event(AuditEventType::LocationPermissionsNotGranted);
        }
        self.state.pending_permission_check = false;
        self.stop_location_requests();
    }

    fn observe_preference(&mut self, enabled: bool) -> Edge {
        let edge = self.state.preference.observe(enabled);
        if edge.entered(false) {
            self.log_event(AuditEventType::LocationTrackingDisabled);
        } else if edge.flipped_to(true) {
            self.log_event(AuditEventType::LocationTrackingEnabled);
        }
        edge
    }

    fn observe_providers(&mut self, available: bool) -> Edge {
        let edge = self.state.providers.observe(available);
        if edge.entered(false) {
            self.log_event(AuditEventType::LocationProvidersDisabled);
        } else if edge.entered(true) {
            self.log_event(AuditEventType::LocationProvidersEnabled);
        }
        edge
    }

    /// `None` when the form does not audit location.
    fn provider_message(&mut self) -> Option<Message> {
        if !self.context.current_form_audits_location() {
            return None;
        }

        let available = self.source.is_location_available();
        self.observe_providers(available);
        Some(if available {
            Message::CollectingLocation
        } else {
            Message::ProvidersDisabled
        })
    }

    fn should_forward(&self) -> bool {
        self.state.form_loaded
            && self.context.current_form_audits_location()
            && self.state.permission == PermissionState::Granted
            && self.state.activity_visible
            && self.state.monitoring
    }

    fn request_parameters(&self) -> (LocationPriority, Duration, Duration) {
        let audited = self
            .audit_config
            .as_ref()
            .filter(|config| config.is_location_enabled())
            .filter(|_| self.context.current_form_audits_location());

        match audited.and_then(|config| Some((config.location_priority()?, config.min_interval()?))) {
            Some((priority, interval)) => (priority, interval, interval),
            None => (
                self.settings.default_priority,
                self.settings.update_interval(),
                self.settings.fastest_interval(),
            ),
        }
    }

    fn start_location_requests(&mut self) {
        if self.state.monitoring {
            return;
        }

        let (priority, interval, fastest) = self.request_parameters();
        self.discard_queued_fixes();
        self.source.start();
        self.source.set_priority(priority);
        self.source.set_update_intervals(interval, fastest);
        self.source.request_location_updates(self.fixes.listener());
        self.state.monitoring = true;
        tracing::info!(
            priority = priority.as_str(),
            interval_secs = interval.as_secs(),
            "Background location updates started"
        );
    }

    fn stop_location_requests(&mut self) {
        if !self.state.monitoring {
            return;
        }

        self.source.stop_location_updates();
        self.source.stop();
        self.state.monitoring = false;
        self.discard_queued_fixes();
        tracing::info!("Background location updates stopped");
    }

    fn discard_queued_fixes(&mut self) {
        let dropped = self.fixes.discard();
        if dropped > 0 {
            tracing::debug!(dropped, "Discarded undelivered fixes");
        }
    }

    fn log_event(&mut self, event: AuditEventType) {
        tracing::info!(event = %event, "Background location audit event");
        self.context.log_audit_event(event);
    }

    fn trace_transition(&self, before: CoordinatorPhase, operation: &'static str) {
        let after = self.state.phase();
        if before != after {
            tracing::debug!(from = ?before, to = ?after, operation, "State transition");
        }
    }
}
