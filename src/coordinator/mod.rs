//! Background location coordination for form sessions.

mod lifecycle;
mod message;
mod state;

pub use lifecycle::*;
pub use message::*;
pub use state::*;
