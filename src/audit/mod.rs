//! Audit events, per-form audit configuration and the in-memory audit trail.

mod error;
mod trail;
mod types;

pub use error::AuditConfigError;
pub use trail::{AuditRecord, AuditRecordKind, AuditTrail};
pub use types::{AuditConfig, AuditConfigBuilder, AuditEventType, AuditMode};
