use async_trait::async_trait;
use softmobile_core::{AppResult, CorporateReason};
use softmobile_domain::{
    ObservabilitySnapshot, SyncHybridBreakdown, SyncHybridForecast, SyncHybridOverview,
    SyncHybridProgress, SyncOutboxEntry, SyncOutboxPriority, SyncOutboxStatsEntry,
    SyncQueueSummary,
};

/// Port for the backend sync and observability endpoints.
#[async_trait]
pub trait SyncApi: Send + Sync {
    /// Lists the local outbox entries.
    async fn list_outbox(&self) -> AppResult<Vec<SyncOutboxEntry>>;

    /// Returns outbox counters per entity type and priority.
    async fn outbox_stats(&self) -> AppResult<Vec<SyncOutboxStatsEntry>>;

    /// Returns the queue summary.
    async fn queue_summary(&self) -> AppResult<SyncQueueSummary>;

    /// Returns the combined hybrid overview.
    async fn hybrid_overview(&self) -> AppResult<SyncHybridOverview>;

    /// Returns the hybrid completion forecast.
    async fn hybrid_forecast(&self) -> AppResult<SyncHybridForecast>;

    /// Returns the per-module hybrid breakdown.
    async fn hybrid_breakdown(&self) -> AppResult<SyncHybridBreakdown>;

    /// Returns hybrid progress alone.
    async fn hybrid_progress(&self) -> AppResult<SyncHybridProgress>;

    /// Requests a new transmission attempt for the given entries.
    async fn retry_outbox(
        &self,
        entry_ids: &[i64],
        reason: &CorporateReason,
    ) -> AppResult<Vec<SyncOutboxEntry>>;

    /// Changes the priority of one entry.
    async fn update_outbox_priority(
        &self,
        entry_id: i64,
        priority: SyncOutboxPriority,
        reason: &CorporateReason,
    ) -> AppResult<SyncOutboxEntry>;

    /// Resolves conflicting entries and returns the resulting outbox.
    async fn resolve_outbox_conflicts(
        &self,
        entry_ids: &[i64],
        reason: &CorporateReason,
    ) -> AppResult<Vec<SyncOutboxEntry>>;

    /// Returns the observability snapshot.
    async fn observability_snapshot(&self) -> AppResult<ObservabilitySnapshot>;
}
