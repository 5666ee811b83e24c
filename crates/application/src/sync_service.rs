use std::sync::Arc;

use softmobile_domain::{
    ObservabilitySnapshot, SyncHybridBreakdown, SyncHybridForecast, SyncHybridOverview,
    SyncHybridProgress, SyncOutboxEntry, SyncOutboxStatsEntry, SyncQueueSummary,
    conflict_entries,
};
use tokio::sync::RwLock;

use crate::dashboard_ports::SyncApi;
use crate::session::DashboardSession;

mod mutations;
mod refresh;

pub use mutations::ConflictResolutionOutcome;

/// Which fetch tier populated the last outbox refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncRefreshSource {
    /// Combined overview endpoint.
    Overview,
    /// Separate forecast and breakdown endpoints.
    Legacy,
    /// Both tiers failed; only progress was attempted.
    ProgressOnly,
    /// Session was disposed before the results arrived.
    Discarded,
}

/// Consistent view of outbox, queue and hybrid sync state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncSnapshot {
    /// Outbox entries.
    pub outbox: Vec<SyncOutboxEntry>,
    /// Outbox counters.
    pub outbox_stats: Vec<SyncOutboxStatsEntry>,
    /// Queue summary.
    pub queue_summary: Option<SyncQueueSummary>,
    /// Combined overview, only when the overview tier succeeded.
    pub hybrid_overview: Option<SyncHybridOverview>,
    /// Completion forecast.
    pub hybrid_forecast: Option<SyncHybridForecast>,
    /// Per-module breakdown.
    pub hybrid_breakdown: Option<SyncHybridBreakdown>,
    /// Hybrid progress.
    pub hybrid_progress: Option<SyncHybridProgress>,
    /// Operator-facing outbox error.
    pub outbox_error: Option<String>,
    /// Observability snapshot.
    pub observability: Option<ObservabilitySnapshot>,
    /// Operator-facing observability error.
    pub observability_error: Option<String>,
    /// Tier that populated the last refresh.
    pub refresh_source: Option<SyncRefreshSource>,
}

impl SyncSnapshot {
    /// Returns entries flagged as conflicting.
    #[must_use]
    pub fn conflict_entries(&self) -> Vec<&SyncOutboxEntry> {
        conflict_entries(&self.outbox)
    }
}

/// Aggregates outbox, queue and hybrid sync state for the dashboard.
#[derive(Clone)]
pub struct SyncService {
    api: Arc<dyn SyncApi>,
    state: Arc<RwLock<SyncSnapshot>>,
    session: DashboardSession,
}

impl SyncService {
    /// Creates a sync service bound to one dashboard session.
    #[must_use]
    pub fn new(api: Arc<dyn SyncApi>, session: DashboardSession) -> Self {
        Self {
            api,
            state: Arc::new(RwLock::new(SyncSnapshot::default())),
            session,
        }
    }

    /// Returns a copy of the current sync view.
    pub async fn snapshot(&self) -> SyncSnapshot {
        self.state.read().await.clone()
    }

    /// Returns entries currently flagged as conflicting.
    pub async fn conflict_entries(&self) -> Vec<SyncOutboxEntry> {
        self.state
            .read()
            .await
            .conflict_entries()
            .into_iter()
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests;
