//! Background location preference changes mid-session.

use location_audit::audit::AuditEventType;
use location_audit::context::SimulatedContext;
use location_audit::coordinator::{CoordinatorPhase, Message};

use super::{collecting, count, loaded};

#[test]
fn turning_preference_off_stops_collection() {
    let mut coordinator = collecting();

    coordinator.context_mut().preference_enabled = false;
    coordinator.background_location_preference_toggled();
    coordinator.background_location_preference_toggled();

    assert!(!coordinator.is_monitoring());
    assert_eq!(count(&coordinator, AuditEventType::LocationTrackingDisabled), 1);
    assert_eq!(coordinator.phase(), CoordinatorPhase::Stopped);
}

#[test]
fn turning_preference_back_on_resumes_collection() {
    let mut coordinator = collecting();

    coordinator.context_mut().preference_enabled = false;
    coordinator.background_location_preference_toggled();
    coordinator.context_mut().preference_enabled = true;
    coordinator.background_location_preference_toggled();

    assert!(coordinator.is_monitoring());
    assert_eq!(count(&coordinator, AuditEventType::LocationTrackingEnabled), 1);
    assert_eq!(coordinator.location_source().start_calls(), 2);
}

#[test]
fn preference_enabled_while_hidden_waits_for_display() {
    let mut coordinator = loaded(SimulatedContext::new().with_preference(false));
    assert_eq!(coordinator.activity_displayed(), Message::LocationPrefDisabled);
    coordinator.activity_hidden();

    coordinator.context_mut().preference_enabled = true;
    coordinator.background_location_preference_toggled();
    assert!(!coordinator.is_pending_permission_check());
    assert_eq!(count(&coordinator, AuditEventType::LocationTrackingEnabled), 1);

    assert_eq!(coordinator.activity_displayed(), Message::None);
    assert!(coordinator.is_pending_permission_check());
    assert_eq!(count(&coordinator, AuditEventType::LocationTrackingEnabled), 1);
}

#[test]
fn preference_enabled_while_visible_requests_permission() {
    let mut coordinator = loaded(SimulatedContext::new().with_preference(false));
    coordinator.activity_displayed();
    assert!(!coordinator.is_pending_permission_check());

    coordinator.context_mut().preference_enabled = true;
    coordinator.background_location_preference_toggled();

    assert!(coordinator.is_pending_permission_check());
    assert!(!coordinator.is_monitoring());
}

#[test]
fn turning_preference_off_clears_pending_request() {
    let mut coordinator = loaded(SimulatedContext::new());
    coordinator.activity_displayed();
    assert!(coordinator.is_pending_permission_check());

    coordinator.context_mut().preference_enabled = false;
    coordinator.background_location_preference_toggled();

    assert!(!coordinator.is_pending_permission_check());
    assert_eq!(count(&coordinator, AuditEventType::LocationTrackingDisabled), 1);
}

#[test]
fn unchanged_preference_logs_nothing() {
    let mut coordinator = collecting();
    let before = coordinator.context().trail().event_count();

    coordinator.background_location_preference_toggled();

    assert_eq!(coordinator.context().trail().event_count(), before);
    assert!(coordinator.is_monitoring());
}
