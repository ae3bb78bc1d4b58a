//! Scripted replay of coordinator sessions.

mod error;
mod runner;
mod types;

pub use error::ScenarioError;
pub use runner::*;
pub use types::*;
