//! Permission resolution and reconciliation.

use location_audit::audit::AuditEventType;
use location_audit::context::SimulatedContext;
use location_audit::coordinator::{Message, PermissionState};

use super::{collecting, count, events, loaded};

#[test]
fn denial_logs_once_and_clears_pending() {
    let mut coordinator = loaded(SimulatedContext::new());
    coordinator.activity_displayed();
    assert!(coordinator.is_pending_permission_check());

    coordinator.location_permission_denied();
    coordinator.location_permission_denied();

    assert!(!coordinator.is_pending_permission_check());
    assert!(!coordinator.is_monitoring());
    assert_eq!(
        events(&coordinator),
        vec![AuditEventType::LocationPermissionsNotGranted]
    );
    assert_eq!(coordinator.state().permission, PermissionState::Denied);
}

#[test]
fn display_after_denial_shows_nothing() {
    let mut coordinator = loaded(SimulatedContext::new());
    coordinator.activity_displayed();
    coordinator.location_permission_denied();

    assert_eq!(coordinator.activity_displayed(), Message::None);
    assert!(!coordinator.is_pending_permission_check());
    assert_eq!(events(&coordinator).len(), 1);
}

#[test]
fn denial_stops_running_updates() {
    let mut coordinator = collecting();
    coordinator.location_permission_denied();

    assert!(!coordinator.is_monitoring());
    assert!(!coordinator.location_source().is_started());
    assert!(!coordinator.location_source().has_listener());
    assert_eq!(
        count(&coordinator, AuditEventType::LocationPermissionsNotGranted),
        1
    );
}

#[test]
fn repeated_grant_logs_once() {
    let mut coordinator = loaded(SimulatedContext::new());
    coordinator.activity_displayed();

    assert_eq!(
        coordinator.location_permission_granted(),
        Message::CollectingLocation
    );
    assert_eq!(
        coordinator.location_permission_granted(),
        Message::CollectingLocation
    );
    assert_eq!(
        count(&coordinator, AuditEventType::LocationPermissionsGranted),
        1
    );
    assert_eq!(coordinator.location_source().start_calls(), 1);
}

#[test]
fn grant_after_denial_logs_grant() {
    let mut coordinator = loaded(SimulatedContext::new());
    coordinator.activity_displayed();
    coordinator.location_permission_denied();

    assert_eq!(
        coordinator.location_permission_granted(),
        Message::CollectingLocation
    );
    assert_eq!(
        events(&coordinator),
        vec![
            AuditEventType::LocationPermissionsNotGranted,
            AuditEventType::LocationPermissionsGranted,
            AuditEventType::LocationProvidersEnabled,
        ]
    );
}

#[test]
fn grant_for_form_without_location_audit_returns_none() {
    let mut coordinator = loaded(SimulatedContext::new().with_location_audit(false));

    assert_eq!(coordinator.activity_displayed(), Message::None);
    assert_eq!(coordinator.location_permission_granted(), Message::None);
    assert!(coordinator.is_monitoring());
    assert_eq!(
        events(&coordinator),
        vec![AuditEventType::LocationPermissionsGranted]
    );
}

#[test]
fn grant_resolving_request_starts_while_hidden() {
    let mut coordinator = loaded(SimulatedContext::new());
    coordinator.activity_displayed();
    // The permission dialog covers the screen.
    coordinator.activity_hidden();

    assert_eq!(
        coordinator.location_permission_granted(),
        Message::CollectingLocation
    );
    assert!(coordinator.is_monitoring());
}

#[test]
fn silently_gained_permission_starts_without_message() {
    let mut coordinator = loaded(SimulatedContext::new());
    coordinator.activity_displayed();
    assert!(coordinator.is_pending_permission_check());

    coordinator.location_permission_changed();

    assert!(coordinator.is_monitoring());
    assert!(!coordinator.is_pending_permission_check());
    assert_eq!(
        count(&coordinator, AuditEventType::LocationPermissionsGranted),
        1
    );
}

#[test]
fn permission_changed_without_change_is_noop() {
    let mut coordinator = loaded(SimulatedContext::new().with_permission(false));
    coordinator.activity_displayed();

    coordinator.location_permission_changed();
    assert!(coordinator.is_pending_permission_check());
    assert!(coordinator.context().trail().is_empty());

    let mut coordinator = collecting();
    let logged = events(&coordinator);
    coordinator.location_permission_changed();
    assert_eq!(events(&coordinator), logged);
    assert!(coordinator.is_monitoring());
}

#[test]
fn lost_then_regained_permission() {
    let mut coordinator = collecting();

    coordinator.context_mut().permission_granted = false;
    coordinator.location_permission_changed();
    assert!(!coordinator.is_monitoring());

    coordinator.context_mut().permission_granted = true;
    coordinator.location_permission_changed();
    assert!(coordinator.is_monitoring());

    assert_eq!(
        count(&coordinator, AuditEventType::LocationPermissionsNotGranted),
        1
    );
    assert_eq!(
        count(&coordinator, AuditEventType::LocationPermissionsGranted),
        2
    );
    assert_eq!(
        count(&coordinator, AuditEventType::LocationProvidersEnabled),
        1
    );
}

#[test]
fn grant_with_capability_missing_does_not_start() {
    let mut coordinator = loaded(SimulatedContext::new().with_capability(false));
    coordinator.activity_displayed();

    assert_eq!(coordinator.location_permission_granted(), Message::None);
    assert!(!coordinator.is_monitoring());
}
