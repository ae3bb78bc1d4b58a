//! Location Audit - background location capture coordination for audited
//! form sessions.
//!
//! The [`coordinator::BackgroundLocationCoordinator`] decides, on every
//! lifecycle or precondition-change event, whether location updates should
//! run, what the hosting screen should tell the user and which audit events
//! to record.

pub mod audit;
pub mod config;
pub mod context;
pub mod coordinator;
pub mod display;
pub mod location;
pub mod scenario;
