//! Colored CLI display utilities for scenario replay output.

use std::io::{self, Write};

use chrono::Utc;
use owo_colors::OwoColorize;

use crate::audit::{AuditRecord, AuditRecordKind};
use crate::config::AppConfig;
use crate::coordinator::{CoordinatorPhase, Message};
use crate::scenario::{ScenarioReport, StepOutcome};

/// Get current timestamp in the same format as tracing.
fn timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}

/// Short label for a coordinator phase.
#[must_use]
pub fn phase_label(phase: CoordinatorPhase) -> &'static str {
    match phase {
        CoordinatorPhase::Inactive => "inactive",
        CoordinatorPhase::NotNeeded => "not-needed",
        CoordinatorPhase::PendingPermission => "pending-permission",
        CoordinatorPhase::Stopped => "stopped",
        CoordinatorPhase::Monitoring => "monitoring",
    }
}

/// Print the scenario header.
pub fn print_scenario_start(name: Option<&str>, steps: usize) {
    println!(
        "{} {} {} ({steps} steps)",
        timestamp().dimmed(),
        "[SCENARIO]".blue().bold(),
        name.unwrap_or("unnamed").cyan()
    );
    let _ = io::stdout().flush();
}

fn print_message(message: Message) {
    let text = message.as_str();
    if message.is_warning() {
        print!(" -> {}", text.yellow().bold());
    } else if message.is_none() {
        print!(" -> {}", text.dimmed());
    } else {
        print!(" -> {}", text.green());
    }
}

/// Print one replayed step.
pub fn print_step(outcome: &StepOutcome) {
    print!(
        "{} {:>3} {}",
        "[STEP]".cyan().bold(),
        outcome.index,
        outcome.action.bold()
    );
    if let Some(message) = outcome.message {
        print_message(message);
    }
    if let Some(forwarded) = outcome.forwarded {
        print!(" -> forwarded={forwarded}");
    }
    println!(" {}", format!("[{}]", phase_label(outcome.phase)).dimmed());

    for failure in &outcome.failures {
        println!("      {} {}", "[FAIL]".red().bold(), failure.red());
    }
    let _ = io::stdout().flush();
}

/// Print one audit trail record.
pub fn print_record(record: &AuditRecord) {
    let ts = record.timestamp.format("%H:%M:%S%.3f").to_string();
    match &record.kind {
        AuditRecordKind::Event { event } => {
            println!(
                "{} {} {}",
                ts.dimmed(),
                "[AUDIT]".magenta().bold(),
                event.as_str()
            );
        }
        AuditRecordKind::Location { fix } => {
            println!(
                "{} {} {}",
                ts.dimmed(),
                "[LOCATION]".blue(),
                fix.to_string().dimmed()
            );
        }
    }
}

/// Print a full report: steps, audit trail and verdict.
pub fn print_report(report: &ScenarioReport) {
    print_scenario_start(report.name.as_deref(), report.steps.len());
    for outcome in &report.steps {
        print_step(outcome);
    }

    println!();
    if report.records.is_empty() {
        println!("{}", "No audit records".dimmed());
    }
    for record in &report.records {
        print_record(record);
    }

    println!();
    print_verdict(report);
}

/// Print whether all expectations held.
pub fn print_verdict(report: &ScenarioReport) {
    let failures = report.failures().count();
    if failures == 0 {
        println!(
            "{} final phase {}",
            "[PASS]".green().bold(),
            phase_label(report.final_phase)
        );
    } else {
        println!(
            "{} {failures} expectation(s) failed, final phase {}",
            "[FAIL]".red().bold(),
            phase_label(report.final_phase)
        );
    }
    let _ = io::stdout().flush();
}

/// Print the effective configuration and where it came from.
pub fn print_config(config: &AppConfig, source: Option<&std::path::Path>) {
    match source {
        Some(path) => println!(
            "{} loaded from {}",
            "[CONFIG]".blue().bold(),
            path.display()
        ),
        None => println!("{} defaults", "[CONFIG]".blue().bold()),
    }
    println!(
        "  default_priority = {}",
        config.location.default_priority.as_str().cyan()
    );
    println!(
        "  update_interval_secs = {}",
        config.location.update_interval_secs
    );
    println!(
        "  fastest_interval_secs = {}",
        config.location.fastest_interval_secs
    );
    println!("  json = {}", config.output.json);
}

/// Print an error.
pub fn print_error(msg: &str) {
    eprintln!(
        "{} {} {}",
        timestamp().dimmed(),
        "[ERROR]".red().bold(),
        msg.red()
    );
}
