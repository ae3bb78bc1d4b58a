//! In-memory audit trail.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::types::AuditEventType;
use crate::location::Fix;

/// What an audit record captured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AuditRecordKind {
    /// A background location transition.
    Event { event: AuditEventType },
    /// A fix forwarded for the audit log.
    Location { fix: Fix },
}

/// A single timestamped entry in the audit trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Unique record ID.
    pub id: Uuid,
    /// When the record was made.
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: AuditRecordKind,
}

impl AuditRecord {
    fn new(kind: AuditRecordKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            kind,
        }
    }
}

/// Ordered, append-only record of audit events and forwarded fixes.
#[derive(Debug, Clone, Default)]
pub struct AuditTrail {
    records: Vec<AuditRecord>,
}

impl AuditTrail {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an audit event.
    pub fn record_event(&mut self, event: AuditEventType) {
        tracing::debug!(event = %event, "Audit event recorded");
        self.records
            .push(AuditRecord::new(AuditRecordKind::Event { event }));
    }

    /// Append a forwarded fix.
    pub fn record_location(&mut self, fix: Fix) {
        tracing::trace!(fix = %fix, "Audit location recorded");
        self.records
            .push(AuditRecord::new(AuditRecordKind::Location { fix }));
    }

    #[must_use]
    pub fn records(&self) -> &[AuditRecord] {
        &self.records
    }

    /// Audit events in the order they were recorded.
    pub fn events(&self) -> impl Iterator<Item = AuditEventType> + '_ {
        self.records.iter().filter_map(|record| match record.kind {
            AuditRecordKind::Event { event } => Some(event),
            AuditRecordKind::Location { .. } => None,
        })
    }

    /// Forwarded fixes in the order they were recorded.
    pub fn locations(&self) -> impl Iterator<Item = &Fix> + '_ {
        self.records.iter().filter_map(|record| match &record.kind {
            AuditRecordKind::Location { fix } => Some(fix),
            AuditRecordKind::Event { .. } => None,
        })
    }

    /// Number of times the given event was recorded.
    #[must_use]
    pub fn count(&self, event: AuditEventType) -> usize {
        self.events().filter(|e| *e == event).count()
    }

    #[must_use]
    pub fn event_count(&self) -> usize {
        self.events().count()
    }

    #[must_use]
    pub fn location_count(&self) -> usize {
        self.locations().count()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Serialize the trail as a JSON array.
    ///
    /// # Errors
    ///
    /// Returns an error if a record cannot be serialized.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.records)
    }
}
