//! Scenario replay against simulated collaborators.

use std::path::Path;

use serde::Serialize;

use super::error::ScenarioError;
use super::types::{Scenario, StateCheck, Step};
use crate::audit::AuditRecord;
use crate::config::CoordinatorSettings;
use crate::context::SimulatedContext;
use crate::coordinator::{BackgroundLocationCoordinator, CoordinatorPhase, Message};
use crate::location::SimulatedLocationSource;

type SimulatedCoordinator = BackgroundLocationCoordinator<SimulatedContext, SimulatedLocationSource>;

/// Read and parse a scenario file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid scenario.
pub fn load_scenario(path: &Path) -> Result<Scenario, ScenarioError> {
    let content = std::fs::read_to_string(path).map_err(|source| ScenarioError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ScenarioError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// What happened at one step.
#[derive(Debug, Clone, Serialize)]
pub struct StepOutcome {
    pub index: usize,
    pub action: &'static str,
    /// Message returned by the coordinator, for calls that return one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
    /// Fixes forwarded to the audit logger, for fix steps.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forwarded: Option<usize>,
    pub phase: CoordinatorPhase,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<String>,
}

/// Result of replaying a whole scenario.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub name: Option<String>,
    pub steps: Vec<StepOutcome>,
    pub records: Vec<AuditRecord>,
    pub final_phase: CoordinatorPhase,
}

impl ScenarioReport {
    /// All expectation failures, prefixed with their step index.
    pub fn failures(&self) -> impl Iterator<Item = String> + '_ {
        self.steps.iter().flat_map(|step| {
            step.failures
                .iter()
                .map(move |failure| format!("step {} ({}): {failure}", step.index, step.action))
        })
    }

    #[must_use]
    pub fn passed(&self) -> bool {
        self.steps.iter().all(|step| step.failures.is_empty())
    }
}

/// Drives a coordinator through scripted steps.
#[derive(Debug)]
pub struct ScenarioRunner {
    name: Option<String>,
    coordinator: SimulatedCoordinator,
}

impl ScenarioRunner {
    /// Build simulated collaborators from the scenario's initial conditions.
    ///
    /// # Errors
    ///
    /// Returns an error if the form's audit settings are invalid.
    pub fn new(scenario: &Scenario, settings: CoordinatorSettings) -> Result<Self, ScenarioError> {
        let context = SimulatedContext::new()
            .with_form_set(scenario.form.set)
            .with_background_location(scenario.form.collects_background_location)
            .with_location_audit(scenario.form.audits_location)
            .with_audit_config(scenario.form.audit.to_config()?)
            .with_capability(scenario.device.capability_available)
            .with_preference(scenario.device.preference_enabled)
            .with_permission(scenario.device.permission_granted);
        let mut source = SimulatedLocationSource::new();
        source.set_available(scenario.device.providers_available);

        Ok(Self {
            name: scenario.name.clone(),
            coordinator: BackgroundLocationCoordinator::with_settings(context, source, settings),
        })
    }

    /// Execute one step.
    pub fn step(&mut self, index: usize, step: &Step) -> StepOutcome {
        let mut message = None;
        let mut forwarded = None;
        let mut failures = Vec::new();
        let coordinator = &mut self.coordinator;

        match step {
            Step::BeginFormSession => coordinator.begin_form_session(),
            Step::FormFinishedLoading => coordinator.form_finished_loading(),
            Step::ActivityDisplayed { expect } => {
                let actual = coordinator.activity_displayed();
                check_message(*expect, actual, &mut failures);
                message = Some(actual);
            }
            Step::ActivityHidden => coordinator.activity_hidden(),
            Step::LocationPermissionGranted { expect } => {
                let actual = coordinator.location_permission_granted();
                check_message(*expect, actual, &mut failures);
                message = Some(actual);
            }
            Step::LocationPermissionDenied => coordinator.location_permission_denied(),
            Step::LocationPermissionChanged => coordinator.location_permission_changed(),
            Step::BackgroundLocationPreferenceToggled => {
                coordinator.background_location_preference_toggled();
            }
            Step::LocationProvidersChanged => coordinator.location_providers_changed(),
            Step::Fix(fix) => {
                coordinator.location_source_mut().emit(fix.clone());
                forwarded = Some(coordinator.pump_fixes());
            }
            Step::Set(change) => {
                change.apply_to(coordinator.context_mut());
                if let Some(available) = change.providers_available {
                    coordinator.location_source_mut().set_available(available);
                }
            }
            Step::Check(check) => check_state(check, coordinator, &mut failures),
        }

        for failure in &failures {
            tracing::warn!(step = index, action = step.action(), %failure, "Scenario expectation failed");
        }

        StepOutcome {
            index,
            action: step.action(),
            message,
            forwarded,
            phase: coordinator.phase(),
            failures,
        }
    }

    /// Execute all steps and produce a report.
    pub fn run(mut self, steps: &[Step]) -> ScenarioReport {
        let outcomes = steps
            .iter()
            .enumerate()
            .map(|(index, step)| self.step(index, step))
            .collect();

        ScenarioReport {
            name: self.name,
            steps: outcomes,
            records: self.coordinator.context().trail().records().to_vec(),
            final_phase: self.coordinator.phase(),
        }
    }
}

/// Replay a scenario from its initial conditions.
///
/// # Errors
///
/// Returns an error if the scenario is empty or its audit settings are invalid.
pub fn replay(scenario: &Scenario, settings: CoordinatorSettings) -> Result<ScenarioReport, ScenarioError> {
    if scenario.steps.is_empty() {
        return Err(ScenarioError::NoSteps);
    }
    let runner = ScenarioRunner::new(scenario, settings)?;
    Ok(runner.run(&scenario.steps))
}

fn check_message(expect: Option<Message>, actual: Message, failures: &mut Vec<String>) {
    if let Some(expected) = expect {
        if expected != actual {
            failures.push(format!("expected message {expected}, got {actual}"));
        }
    }
}

fn check_state(check: &StateCheck, coordinator: &SimulatedCoordinator, failures: &mut Vec<String>) {
    let trail = coordinator.context().trail();
    let mut compare = |what: &str, expected: Option<String>, actual: String| {
        if let Some(expected) = expected {
            if expected != actual {
                failures.push(format!("expected {what} {expected}, got {actual}"));
            }
        }
    };

    compare(
        "pending_permission_check",
        check.pending_permission_check.map(|v| v.to_string()),
        coordinator.is_pending_permission_check().to_string(),
    );
    compare(
        "monitoring",
        check.monitoring.map(|v| v.to_string()),
        coordinator.is_monitoring().to_string(),
    );
    compare(
        "events",
        check.events.map(|v| v.to_string()),
        trail.event_count().to_string(),
    );
    compare(
        "locations",
        check.locations.map(|v| v.to_string()),
        trail.location_count().to_string(),
    );
}
