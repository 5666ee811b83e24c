use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use softmobile_core::AppError;

/// Transmission priority of one outbox entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SyncOutboxPriority {
    /// Sent before everything else.
    High,
    /// Default priority.
    Normal,
    /// Sent once nothing else is waiting.
    Low,
}

impl SyncOutboxPriority {
    /// Returns the stable transport value for this priority.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Normal => "NORMAL",
            Self::Low => "LOW",
        }
    }
}

impl FromStr for SyncOutboxPriority {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "HIGH" => Ok(Self::High),
            "NORMAL" => Ok(Self::Normal),
            "LOW" => Ok(Self::Low),
            _ => Err(AppError::Validation(format!(
                "unknown outbox priority '{value}'"
            ))),
        }
    }
}

/// Delivery status of one outbox entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SyncOutboxStatus {
    /// Waiting for transmission.
    Pending,
    /// Delivered to the central backend.
    Sent,
    /// Last transmission attempt failed.
    Failed,
}

/// A locally queued change awaiting transmission to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncOutboxEntry {
    /// Outbox entry identifier.
    pub id: i64,
    /// Entity family of the queued change (device, sale, customer...).
    pub entity_type: String,
    /// Identifier of the changed entity.
    pub entity_id: String,
    /// Mutation kind (UPSERT, DELETE...).
    pub operation: String,
    /// Serialized change payload.
    #[serde(default)]
    pub payload: Value,
    /// Number of transmission attempts so far.
    #[serde(default)]
    pub attempt_count: u32,
    /// Timestamp of the latest transmission attempt.
    #[serde(default)]
    pub last_attempt_at: Option<DateTime<Utc>>,
    /// Delivery status.
    pub status: SyncOutboxStatus,
    /// Transmission priority.
    pub priority: SyncOutboxPriority,
    /// Whether the backend detected a conflicting remote version.
    #[serde(default)]
    pub conflict_flag: bool,
    /// Optimistic version counter.
    #[serde(default)]
    pub version: u32,
    /// Last transmission error, if any.
    #[serde(default)]
    pub error_message: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Returns the entries flagged as conflicting, in their original order.
#[must_use]
pub fn conflict_entries(entries: &[SyncOutboxEntry]) -> Vec<&SyncOutboxEntry> {
    entries.iter().filter(|entry| entry.conflict_flag).collect()
}

/// Aggregate counters for one entity type and priority bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncOutboxStatsEntry {
    /// Entity family of the bucket.
    pub entity_type: String,
    /// Priority of the bucket.
    pub priority: SyncOutboxPriority,
    /// All entries in the bucket.
    pub total: u64,
    /// Entries still waiting.
    pub pending: u64,
    /// Entries whose last attempt failed.
    pub failed: u64,
    /// Entries flagged as conflicting.
    #[serde(default)]
    pub conflicts: u64,
    /// Most recent update inside the bucket.
    #[serde(default)]
    pub latest_update: Option<DateTime<Utc>>,
    /// Oldest entry still pending.
    #[serde(default)]
    pub oldest_pending: Option<DateTime<Utc>>,
}

/// Summary of the sync queue used by progress widgets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncQueueSummary {
    /// Completion percentage, 0 to 100.
    pub percent: f64,
    /// All queued events.
    pub total: u64,
    /// Events already processed.
    pub processed: u64,
    /// Events still waiting.
    pub pending: u64,
    /// Events that failed.
    pub failed: u64,
    /// Timestamp of the latest queue movement.
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
    /// Oldest pending event.
    #[serde(default)]
    pub oldest_pending: Option<DateTime<Utc>>,
}

/// Totals for one hybrid sync component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncHybridComponentProgress {
    /// All events of the component.
    pub total: u64,
    /// Events already processed.
    pub processed: u64,
    /// Events still waiting.
    pub pending: u64,
    /// Events that failed.
    pub failed: u64,
}

/// Per-component progress of hybrid sync.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncHybridComponents {
    /// Remote queue component.
    pub queue: SyncHybridComponentProgress,
    /// Local outbox component.
    pub outbox: SyncHybridComponentProgress,
}

/// Hybrid sync progress figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncHybridProgress {
    /// Completion percentage, 0 to 100.
    pub percent: f64,
    /// All events across components.
    pub total: u64,
    /// Events already processed.
    pub processed: u64,
    /// Events still waiting.
    pub pending: u64,
    /// Events that failed.
    pub failed: u64,
    /// Per-component detail.
    #[serde(default)]
    pub components: SyncHybridComponents,
}

/// Hybrid sync completion forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncHybridForecast {
    /// Generation timestamp.
    pub generated_at: DateTime<Utc>,
    /// Window used to measure throughput.
    pub lookback_minutes: u32,
    /// Events processed inside the window.
    pub processed_recent: u64,
    /// Observed throughput.
    pub events_per_minute: f64,
    /// Events left to process.
    pub backlog_total: u64,
    /// Estimated minutes until the backlog drains.
    #[serde(default)]
    pub estimated_minutes_remaining: Option<f64>,
    /// Estimated completion timestamp.
    #[serde(default)]
    pub estimated_completion: Option<DateTime<Utc>>,
    /// Transmission attempts inside the window.
    #[serde(default)]
    pub attempts_total: u64,
    /// Successful transmission attempts inside the window.
    #[serde(default)]
    pub attempts_successful: u64,
    /// Progress snapshot the forecast was computed from.
    pub progress: SyncHybridProgress,
}

/// Per-module hybrid sync breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncHybridModuleBreakdownItem {
    /// Stable module key.
    pub module: String,
    /// Display label.
    pub label: String,
    /// Remote queue totals for the module.
    pub queue: SyncHybridComponentProgress,
    /// Local outbox totals for the module.
    pub outbox: SyncHybridComponentProgress,
}

impl SyncHybridModuleBreakdownItem {
    /// Returns pending events across both components.
    #[must_use]
    pub fn pending(&self) -> u64 {
        self.queue.pending.saturating_add(self.outbox.pending)
    }
}

/// Hybrid sync breakdown as returned by the dedicated endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncHybridBreakdown {
    /// Generation timestamp.
    pub generated_at: DateTime<Utc>,
    /// Per-module items.
    pub modules: Vec<SyncHybridModuleBreakdownItem>,
}

/// Combined hybrid sync overview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncHybridOverview {
    /// Generation timestamp.
    pub generated_at: DateTime<Utc>,
    /// Completion percentage, 0 to 100.
    pub percent: f64,
    /// All events across components.
    pub total: u64,
    /// Events already processed.
    pub processed: u64,
    /// Events still waiting.
    pub pending: u64,
    /// Events that failed.
    pub failed: u64,
    /// Embedded forecast.
    pub forecast: SyncHybridForecast,
    /// Embedded per-module breakdown.
    #[serde(default)]
    pub breakdown: Vec<SyncHybridModuleBreakdownItem>,
}

impl SyncHybridOverview {
    /// Returns the progress embedded in the overview forecast.
    #[must_use]
    pub fn progress(&self) -> &SyncHybridProgress {
        &self.forecast.progress
    }

    /// Returns the embedded breakdown in the dedicated endpoint shape.
    #[must_use]
    pub fn breakdown(&self) -> SyncHybridBreakdown {
        SyncHybridBreakdown {
            generated_at: self.generated_at,
            modules: self.breakdown.clone(),
        }
    }
}
