use softmobile_core::AppResult;
use tracing::{debug, info, warn};

use super::{SyncRefreshSource, SyncService};
use crate::error_messages::friendly_error_message;

impl SyncService {
    /// Refreshes outbox, stats, summary and hybrid state.
    ///
    /// Tries the combined overview first, then the separate forecast and
    /// breakdown endpoints, and finally progress alone. Entries already loaded
    /// stay in place when both full tiers fail.
    pub async fn refresh_outbox(&self) -> SyncRefreshSource {
        let overview_result = tokio::try_join!(
            self.api.list_outbox(),
            self.api.outbox_stats(),
            self.api.queue_summary(),
            self.api.hybrid_overview()
        );

        let overview_error = match overview_result {
            Ok((entries, stats, summary, overview)) => {
                if self.session.is_disposed() {
                    return SyncRefreshSource::Discarded;
                }

                let mut state = self.state.write().await;
                state.hybrid_progress = Some(overview.progress().clone());
                state.hybrid_forecast = Some(overview.forecast.clone());
                state.hybrid_breakdown = Some(overview.breakdown());
                state.hybrid_overview = Some(overview);
                state.outbox = entries;
                state.outbox_stats = stats;
                state.queue_summary = Some(summary);
                state.outbox_error = None;
                state.refresh_source = Some(SyncRefreshSource::Overview);
                debug!(
                    entries = state.outbox.len(),
                    "sync outbox refreshed from overview"
                );
                return SyncRefreshSource::Overview;
            }
            Err(error) => error,
        };

        warn!(error = %overview_error, "sync overview unavailable, using separate endpoints");
        if self.session.is_disposed() {
            return SyncRefreshSource::Discarded;
        }

        let legacy_result = tokio::try_join!(
            self.api.list_outbox(),
            self.api.outbox_stats(),
            self.api.queue_summary(),
            self.api.hybrid_forecast(),
            self.api.hybrid_breakdown()
        );

        let legacy_error = match legacy_result {
            Ok((entries, stats, summary, forecast, breakdown)) => {
                if self.session.is_disposed() {
                    return SyncRefreshSource::Discarded;
                }

                let mut state = self.state.write().await;
                state.hybrid_overview = None;
                state.hybrid_progress = Some(forecast.progress.clone());
                state.hybrid_forecast = Some(forecast);
                state.hybrid_breakdown = Some(breakdown);
                state.outbox = entries;
                state.outbox_stats = stats;
                state.queue_summary = Some(summary);
                state.outbox_error = None;
                state.refresh_source = Some(SyncRefreshSource::Legacy);
                debug!(
                    entries = state.outbox.len(),
                    "sync outbox refreshed from separate endpoints"
                );
                return SyncRefreshSource::Legacy;
            }
            Err(error) => error,
        };

        warn!(error = %legacy_error, "sync outbox refresh failed, loading progress only");
        if self.session.is_disposed() {
            return SyncRefreshSource::Discarded;
        }
        self.state.write().await.outbox_error = Some(friendly_error_message(&legacy_error));

        let progress = match self.api.hybrid_progress().await {
            Ok(progress) => Some(progress),
            Err(error) => {
                warn!(error = %error, "hybrid sync progress unavailable");
                None
            }
        };

        if self.session.is_disposed() {
            return SyncRefreshSource::Discarded;
        }

        let mut state = self.state.write().await;
        state.hybrid_progress = progress;
        state.refresh_source = Some(SyncRefreshSource::ProgressOnly);
        SyncRefreshSource::ProgressOnly
    }

    /// Re-fetches outbox counters and queue summary.
    pub async fn refresh_outbox_stats(&self) -> AppResult<()> {
        let (stats, summary) =
            tokio::try_join!(self.api.outbox_stats(), self.api.queue_summary())?;

        if self.session.is_disposed() {
            return Ok(());
        }

        let mut state = self.state.write().await;
        state.outbox_stats = stats;
        state.queue_summary = Some(summary);
        Ok(())
    }

    /// Refreshes the observability snapshot, keeping the previous one on failure.
    pub async fn refresh_observability(&self) -> AppResult<()> {
        let result = self.api.observability_snapshot().await;
        if self.session.is_disposed() {
            return Ok(());
        }

        let mut state = self.state.write().await;
        match result {
            Ok(snapshot) => {
                info!(
                    notifications = snapshot.notifications.len(),
                    "observability snapshot refreshed"
                );
                state.observability = Some(snapshot);
                state.observability_error = None;
                Ok(())
            }
            Err(error) => {
                warn!(error = %error, "observability snapshot unavailable");
                state.observability_error = Some(friendly_error_message(&error));
                Err(error)
            }
        }
    }
}
