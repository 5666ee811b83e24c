use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;
use softmobile_application::SyncApi;
use softmobile_core::{AppResult, CorporateReason};
use softmobile_domain::{
    ObservabilitySnapshot, SyncHybridBreakdown, SyncHybridForecast, SyncHybridOverview,
    SyncHybridProgress, SyncOutboxEntry, SyncOutboxPriority, SyncOutboxStatsEntry,
    SyncQueueSummary,
};

use super::HttpSoftmobileClient;

#[derive(Debug, Serialize)]
pub(super) struct OutboxIdsRequest<'a> {
    pub(super) ids: &'a [i64],
}

#[derive(Debug, Serialize)]
pub(super) struct OutboxPriorityRequest {
    pub(super) priority: SyncOutboxPriority,
}

#[async_trait]
impl SyncApi for HttpSoftmobileClient {
    async fn list_outbox(&self) -> AppResult<Vec<SyncOutboxEntry>> {
        self.get_json(self.endpoint("sync/outbox")?).await
    }

    async fn outbox_stats(&self) -> AppResult<Vec<SyncOutboxStatsEntry>> {
        self.get_json(self.endpoint("sync/outbox/stats")?).await
    }

    async fn queue_summary(&self) -> AppResult<SyncQueueSummary> {
        self.get_json(self.endpoint("sync/queue/summary")?).await
    }

    async fn hybrid_overview(&self) -> AppResult<SyncHybridOverview> {
        self.get_json(self.endpoint("sync/status/overview")?).await
    }

    async fn hybrid_forecast(&self) -> AppResult<SyncHybridForecast> {
        self.get_json(self.endpoint("sync/status/forecast")?).await
    }

    async fn hybrid_breakdown(&self) -> AppResult<SyncHybridBreakdown> {
        self.get_json(self.endpoint("sync/status/breakdown")?).await
    }

    async fn hybrid_progress(&self) -> AppResult<SyncHybridProgress> {
        self.get_json(self.endpoint("sync/status/hybrid")?).await
    }

    async fn retry_outbox(
        &self,
        entry_ids: &[i64],
        reason: &CorporateReason,
    ) -> AppResult<Vec<SyncOutboxEntry>> {
        self.send_json(
            Method::POST,
            self.endpoint("sync/outbox/retry")?,
            &OutboxIdsRequest { ids: entry_ids },
            reason,
        )
        .await
    }

    async fn update_outbox_priority(
        &self,
        entry_id: i64,
        priority: SyncOutboxPriority,
        reason: &CorporateReason,
    ) -> AppResult<SyncOutboxEntry> {
        self.send_json(
            Method::PATCH,
            self.endpoint(format!("sync/outbox/{entry_id}/priority").as_str())?,
            &OutboxPriorityRequest { priority },
            reason,
        )
        .await
    }

    async fn resolve_outbox_conflicts(
        &self,
        entry_ids: &[i64],
        reason: &CorporateReason,
    ) -> AppResult<Vec<SyncOutboxEntry>> {
        self.send_json(
            Method::POST,
            self.endpoint("sync/outbox/resolve")?,
            &OutboxIdsRequest { ids: entry_ids },
            reason,
        )
        .await
    }

    async fn observability_snapshot(&self) -> AppResult<ObservabilitySnapshot> {
        self.get_json(self.endpoint("monitoring/observability")?)
            .await
    }
}
