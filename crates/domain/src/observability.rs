use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::audit::AuditSeverity;
use crate::sync::{SyncHybridProgress, SyncOutboxStatsEntry};

/// Outbox latency sample for one entity family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservabilityLatencySample {
    /// Entity family.
    pub entity_type: String,
    /// Entries waiting.
    pub pending: u64,
    /// Entries failed.
    pub failed: u64,
    /// Age of the oldest pending entry.
    #[serde(default)]
    pub oldest_pending_seconds: Option<f64>,
}

/// Latency aggregates across the outbox.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObservabilityLatencySummary {
    /// Mean age of pending entries.
    #[serde(default)]
    pub average_seconds: Option<f64>,
    /// 95th percentile age of pending entries.
    #[serde(default)]
    pub percentile_95_seconds: Option<f64>,
    /// Maximum age of pending entries.
    #[serde(default)]
    pub max_seconds: Option<f64>,
    /// Per-entity samples.
    #[serde(default)]
    pub samples: Vec<ObservabilityLatencySample>,
}

/// Error counters over recent audit activity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservabilityErrorSummary {
    /// Inspected log entries.
    pub total_logs: u64,
    /// Entries classified as errors.
    pub total_errors: u64,
    /// Info entries.
    pub info: u64,
    /// Warning entries.
    pub warning: u64,
    /// Critical entries.
    pub critical: u64,
    /// Latest error timestamp.
    #[serde(default)]
    pub latest_error_at: Option<DateTime<Utc>>,
}

/// Sync figures embedded in the observability snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObservabilitySyncSummary {
    /// Outbox stats at snapshot time.
    #[serde(default)]
    pub outbox_stats: Vec<SyncOutboxStatsEntry>,
    /// Pending outbox entries.
    #[serde(default)]
    pub total_pending: u64,
    /// Failed outbox entries.
    #[serde(default)]
    pub failed_entries: u64,
    /// Hybrid progress at snapshot time.
    #[serde(default)]
    pub hybrid_progress: Option<SyncHybridProgress>,
}

/// Operational notification raised by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservabilityNotification {
    /// Notification identifier.
    pub id: String,
    /// Short title.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Severity.
    pub severity: AuditSeverity,
    /// Occurrence timestamp.
    #[serde(default)]
    pub occurred_at: Option<DateTime<Utc>>,
}

/// Backend observability snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservabilitySnapshot {
    /// Generation timestamp.
    pub generated_at: DateTime<Utc>,
    /// Latency aggregates.
    #[serde(default)]
    pub latency: ObservabilityLatencySummary,
    /// Error counters.
    #[serde(default)]
    pub errors: ObservabilityErrorSummary,
    /// Sync figures.
    #[serde(default)]
    pub sync: ObservabilitySyncSummary,
    /// Active notifications.
    #[serde(default)]
    pub notifications: Vec<ObservabilityNotification>,
}

impl ObservabilitySnapshot {
    /// Returns notifications at critical severity.
    pub fn critical_notifications(&self) -> impl Iterator<Item = &ObservabilityNotification> {
        self.notifications
            .iter()
            .filter(|notification| notification.severity == AuditSeverity::Critical)
    }
}
