//! Form session lifecycle and location source control.

use std::time::Duration;

use location_audit::audit::{AuditConfig, AuditEventType, AuditMode};
use location_audit::config::CoordinatorSettings;
use location_audit::context::SimulatedContext;
use location_audit::coordinator::{BackgroundLocationCoordinator, CoordinatorPhase, Message};
use location_audit::location::{Fix, LocationPriority, SimulatedLocationSource};

use super::{collecting, count, events, loaded};

#[test]
fn reloading_form_does_not_relog_known_conditions() {
    let mut coordinator = loaded(SimulatedContext::new().with_capability(false));
    coordinator.activity_displayed();

    coordinator.form_finished_loading();
    assert_eq!(
        coordinator.activity_displayed(),
        Message::PlayServicesUnavailable
    );
    assert_eq!(
        count(&coordinator, AuditEventType::GooglePlayServicesNotAvailable),
        1
    );
}

#[test]
fn new_form_session_starts_from_clean_baseline() {
    let mut coordinator = loaded(SimulatedContext::new().with_capability(false));
    coordinator.activity_displayed();

    coordinator.begin_form_session();
    assert_eq!(coordinator.phase(), CoordinatorPhase::Inactive);
    assert_eq!(coordinator.activity_displayed(), Message::None);

    coordinator.form_finished_loading();
    coordinator.activity_displayed();
    assert_eq!(
        count(&coordinator, AuditEventType::GooglePlayServicesNotAvailable),
        2
    );
}

#[test]
fn new_form_session_stops_running_updates() {
    let mut coordinator = collecting();
    coordinator.begin_form_session();

    assert!(!coordinator.is_monitoring());
    assert!(!coordinator.location_source().is_started());
    assert_eq!(coordinator.location_source().stop_calls(), 1);
}

#[test]
fn previous_session_does_not_leak_into_next_session() {
    let mut coordinator = collecting();
    coordinator
        .location_source_mut()
        .emit(Fix::new("gps", 9.0, 9.0));
    coordinator.location_source_mut().set_available(false);
    coordinator.location_providers_changed();
    let first_session = events(&coordinator).len();

    coordinator.begin_form_session();
    coordinator.location_source_mut().set_available(true);
    coordinator.form_finished_loading();

    assert_eq!(coordinator.activity_displayed(), Message::None);
    assert!(coordinator.is_pending_permission_check());
    assert_eq!(
        coordinator.location_permission_granted(),
        Message::CollectingLocation
    );
    assert_eq!(coordinator.pump_fixes(), 0);

    assert_eq!(
        events(&coordinator)[first_session..],
        [
            AuditEventType::LocationPermissionsGranted,
            AuditEventType::LocationProvidersEnabled,
        ]
    );
    assert_eq!(coordinator.context().trail().location_count(), 0);

    coordinator
        .location_source_mut()
        .emit(Fix::new("gps", 1.0, 1.0));
    assert_eq!(coordinator.pump_fixes(), 1);
}

#[test]
fn reloaded_form_without_background_location_stops_updates() {
    let mut coordinator = collecting();
    coordinator.context_mut().collects_background_location = false;

    coordinator.form_finished_loading();

    assert!(!coordinator.is_monitoring());
    assert_eq!(coordinator.phase(), CoordinatorPhase::NotNeeded);
    assert_eq!(coordinator.activity_displayed(), Message::None);
}

#[test]
fn hide_and_redisplay_restarts_without_logging() {
    let mut coordinator = collecting();
    let logged = coordinator.context().trail().event_count();

    coordinator.activity_hidden();
    assert_eq!(coordinator.phase(), CoordinatorPhase::Stopped);
    assert_eq!(
        coordinator.activity_displayed(),
        Message::CollectingLocation
    );

    assert_eq!(coordinator.phase(), CoordinatorPhase::Monitoring);
    assert_eq!(coordinator.context().trail().event_count(), logged);
    assert_eq!(coordinator.location_source().start_calls(), 2);
    assert_eq!(coordinator.location_source().stop_calls(), 1);
}

#[test]
fn providers_change_ignored_when_not_monitoring() {
    let mut coordinator = collecting();
    coordinator.activity_hidden();

    coordinator.location_source_mut().set_available(false);
    coordinator.location_providers_changed();

    assert_eq!(
        count(&coordinator, AuditEventType::LocationProvidersDisabled),
        0
    );
}

#[test]
fn audit_config_drives_location_requests() {
    let audit_config = AuditConfig::builder()
        .mode(AuditMode::LowPower)
        .min_interval(Duration::from_secs(45))
        .max_age(Duration::from_secs(300))
        .build()
        .unwrap();
    let mut coordinator = loaded(SimulatedContext::new().with_audit_config(audit_config.clone()));
    coordinator.activity_displayed();
    coordinator.location_permission_granted();

    assert_eq!(coordinator.audit_config(), Some(&audit_config));
    let source = coordinator.location_source();
    assert_eq!(source.priority(), Some(LocationPriority::LowPower));
    assert_eq!(
        source.intervals(),
        Some((Duration::from_secs(45), Duration::from_secs(45)))
    );
}

#[test]
fn settings_used_without_location_audit_config() {
    let settings = CoordinatorSettings {
        default_priority: LocationPriority::NoPower,
        update_interval_secs: 90,
        fastest_interval_secs: 30,
    };
    let mut coordinator = BackgroundLocationCoordinator::with_settings(
        SimulatedContext::new(),
        SimulatedLocationSource::new(),
        settings,
    );
    coordinator.form_finished_loading();
    coordinator.activity_displayed();
    coordinator.location_permission_granted();

    let source = coordinator.location_source();
    assert_eq!(source.priority(), Some(LocationPriority::NoPower));
    assert_eq!(
        source.intervals(),
        Some((Duration::from_secs(90), Duration::from_secs(30)))
    );
}

#[test]
fn last_location_passes_through() {
    let mut coordinator = collecting();
    assert!(coordinator.last_location().is_none());

    coordinator
        .location_source_mut()
        .emit(Fix::new("fused", 7.0, 8.0));
    assert_eq!(
        coordinator.last_location().map(|f| f.provider),
        Some("fused".to_string())
    );
}
