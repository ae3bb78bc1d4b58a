//! Location source abstraction and fix types.

mod simulated;
mod source;
mod types;

pub use simulated::SimulatedLocationSource;
pub use source::{FixChannel, FixListener, LocationSource};
pub use types::{Fix, LocationPriority};
