//! location-audit - replay background location sessions against the coordinator.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use location_audit::config::{AppConfig, ConfigLoader};
use location_audit::display;
use location_audit::scenario::{load_scenario, replay, ScenarioReport};

#[derive(Parser)]
#[command(
    name = "location-audit",
    about = "Background location capture coordination for audited form sessions",
    version
)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file to use instead of the default search paths.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a scenario and print each step and the audit trail.
    Replay {
        /// Scenario file (TOML).
        scenario: PathBuf,
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Replay a scenario and fail if any expectation does not hold.
    Check {
        /// Scenario file (TOML).
        scenario: PathBuf,
    },
    /// Show the effective configuration.
    Config,
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run_scenario(path: &Path, config: &AppConfig) -> Option<ScenarioReport> {
    let scenario = match load_scenario(path) {
        Ok(scenario) => scenario,
        Err(e) => {
            display::print_error(&e.to_string());
            return None;
        }
    };
    tracing::info!(
        path = %path.display(),
        steps = scenario.steps.len(),
        "Replaying scenario"
    );
    match replay(&scenario, config.location.clone()) {
        Ok(report) => Some(report),
        Err(e) => {
            display::print_error(&e.to_string());
            None
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let loader = cli
        .config
        .clone()
        .map_or_else(ConfigLoader::new, ConfigLoader::with_path);
    let config = match loader.load() {
        Ok(config) => config,
        Err(e) => {
            display::print_error(&e.to_string());
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Replay { scenario, json } => {
            let Some(report) = run_scenario(&scenario, &config) else {
                return ExitCode::FAILURE;
            };
            if json || config.output.json {
                match serde_json::to_string_pretty(&report) {
                    Ok(out) => println!("{out}"),
                    Err(e) => {
                        display::print_error(&e.to_string());
                        return ExitCode::FAILURE;
                    }
                }
            } else {
                display::print_report(&report);
            }
            ExitCode::SUCCESS
        }
        Commands::Check { scenario } => {
            let Some(report) = run_scenario(&scenario, &config) else {
                return ExitCode::FAILURE;
            };
            for failure in report.failures() {
                display::print_error(&failure);
            }
            display::print_verdict(&report);
            if report.passed() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Commands::Config => {
            display::print_config(&config, loader.find_config_file().as_deref());
            ExitCode::SUCCESS
        }
    }
}
