//! Coordinator tests.

mod lifecycle_test;
mod permission_test;
mod preference_test;

use location_audit::audit::AuditEventType;
use location_audit::context::SimulatedContext;
use location_audit::coordinator::BackgroundLocationCoordinator;
use location_audit::location::SimulatedLocationSource;

pub type Coordinator = BackgroundLocationCoordinator<SimulatedContext, SimulatedLocationSource>;

/// A coordinator whose form has finished loading.
pub fn loaded(context: SimulatedContext) -> Coordinator {
    let mut coordinator = BackgroundLocationCoordinator::new(context, SimulatedLocationSource::new());
    coordinator.form_finished_loading();
    coordinator
}

/// A visible coordinator that has been granted permission and is collecting.
pub fn collecting() -> Coordinator {
    let mut coordinator = loaded(SimulatedContext::new());
    coordinator.activity_displayed();
    coordinator.location_permission_granted();
    assert!(coordinator.is_monitoring());
    coordinator
}

pub fn events(coordinator: &Coordinator) -> Vec<AuditEventType> {
    coordinator.context().trail().events().collect()
}

pub fn count(coordinator: &Coordinator, event: AuditEventType) -> usize {
    coordinator.context().trail().count(event)
}

/// Verify the public coordinator types are exported from the library.
#[test]
fn test_all_coordinator_types_exported() {
    use location_audit::coordinator::{
        ConditionLatch, CoordinatorPhase, Edge, Message, PermissionState, SessionState,
    };

    let _ = ConditionLatch::default();
    let _ = SessionState::default();
    let _ = PermissionState::Undetermined;
    let _ = CoordinatorPhase::Inactive;
    let _ = Edge::Unchanged;
    let _ = Message::None;
}
