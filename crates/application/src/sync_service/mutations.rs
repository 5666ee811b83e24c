use softmobile_core::{AppError, AppResult, CorporateReason};
use softmobile_domain::{SyncOutboxEntry, SyncOutboxPriority};
use tracing::{info, warn};

use super::SyncService;
use crate::dashboard_ports::ReasonPrompt;
use crate::error_messages::friendly_error_message;

const RESOLVE_CONFLICTS_PROMPT: &str =
    "Enter the corporate reason for resolving the outbox conflicts (min. 5 characters)";

/// Result of a bulk conflict resolution request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictResolutionOutcome {
    /// No entry was flagged as conflicting; nothing was asked or sent.
    NoConflicts,
    /// Operator dismissed the reason prompt.
    Cancelled,
    /// Backend resolved the conflicts.
    Resolved {
        /// Entries sent for resolution.
        resolved: usize,
        /// Operator-facing confirmation.
        message: String,
    },
}

impl SyncService {
    /// Changes the priority of one outbox entry.
    ///
    /// The reason is validated before any request. On success the local entry
    /// is patched with the server copy and stats are refreshed afterwards; on
    /// failure the local entry is left untouched.
    pub async fn reprioritize_outbox(
        &self,
        entry_id: i64,
        priority: SyncOutboxPriority,
        reason: &str,
    ) -> AppResult<SyncOutboxEntry> {
        let reason = CorporateReason::new(reason)?;

        let updated = match self
            .api
            .update_outbox_priority(entry_id, priority, &reason)
            .await
        {
            Ok(updated) => updated,
            Err(error) => {
                warn!(entry_id, error = %error, "outbox reprioritization failed");
                self.record_outbox_error(&error).await;
                return Err(error);
            }
        };

        if self.session.is_disposed() {
            return Ok(updated);
        }

        {
            let mut state = self.state.write().await;
            if let Some(entry) = state.outbox.iter_mut().find(|entry| entry.id == entry_id) {
                *entry = updated.clone();
            }
            state.outbox_error = None;
        }
        info!(entry_id, priority = priority.as_str(), "outbox entry reprioritized");

        self.refresh_stats_after_mutation().await;
        Ok(updated)
    }

    /// Asks the backend to retry every entry currently in the outbox.
    ///
    /// Returns the number of entries sent for retry; an empty outbox sends
    /// nothing.
    pub async fn retry_outbox(&self, reason: &str) -> AppResult<usize> {
        let entry_ids: Vec<i64> = self
            .state
            .read()
            .await
            .outbox
            .iter()
            .map(|entry| entry.id)
            .collect();
        if entry_ids.is_empty() {
            return Ok(0);
        }

        let reason = CorporateReason::new(reason)?;
        let retried = match self.api.retry_outbox(&entry_ids, &reason).await {
            Ok(retried) => retried,
            Err(error) => {
                warn!(entries = entry_ids.len(), error = %error, "outbox retry failed");
                self.record_outbox_error(&error).await;
                return Err(error);
            }
        };

        if self.session.is_disposed() {
            return Ok(entry_ids.len());
        }

        {
            let mut state = self.state.write().await;
            for updated in retried {
                if let Some(entry) = state.outbox.iter_mut().find(|entry| entry.id == updated.id) {
                    *entry = updated;
                }
            }
            state.outbox_error = None;
        }
        info!(entries = entry_ids.len(), "outbox retry requested");

        self.refresh_stats_after_mutation().await;
        Ok(entry_ids.len())
    }

    /// Resolves every conflicting outbox entry after operator confirmation.
    ///
    /// With no conflicting entries nothing is prompted or sent. On success the
    /// outbox is replaced with the list returned by the backend.
    pub async fn resolve_outbox_conflicts(
        &self,
        prompt: &dyn ReasonPrompt,
    ) -> AppResult<ConflictResolutionOutcome> {
        let conflict_ids: Vec<i64> = self
            .state
            .read()
            .await
            .conflict_entries()
            .into_iter()
            .map(|entry| entry.id)
            .collect();
        if conflict_ids.is_empty() {
            return Ok(ConflictResolutionOutcome::NoConflicts);
        }

        let Some(reason) = prompt.request_reason(RESOLVE_CONFLICTS_PROMPT).await else {
            return Ok(ConflictResolutionOutcome::Cancelled);
        };
        let reason = CorporateReason::new(reason)?;

        let outbox = match self
            .api
            .resolve_outbox_conflicts(&conflict_ids, &reason)
            .await
        {
            Ok(outbox) => outbox,
            Err(error) => {
                warn!(
                    conflicts = conflict_ids.len(),
                    error = %error,
                    "outbox conflict resolution failed"
                );
                self.record_outbox_error(&error).await;
                return Err(error);
            }
        };

        let resolved = conflict_ids.len();
        let message = if resolved == 1 {
            "1 outbox conflict marked as resolved.".to_owned()
        } else {
            format!("{resolved} outbox conflicts marked as resolved.")
        };

        if self.session.is_disposed() {
            return Ok(ConflictResolutionOutcome::Resolved { resolved, message });
        }

        {
            let mut state = self.state.write().await;
            state.outbox = outbox;
            state.outbox_error = None;
        }
        info!(conflicts = resolved, "outbox conflicts resolved");

        self.refresh_stats_after_mutation().await;
        Ok(ConflictResolutionOutcome::Resolved { resolved, message })
    }

    async fn refresh_stats_after_mutation(&self) {
        if let Err(error) = self.refresh_outbox_stats().await {
            warn!(error = %error, "outbox stats refresh after mutation failed");
            self.record_outbox_error(&error).await;
        }
    }

    async fn record_outbox_error(&self, error: &AppError) {
        if self.session.is_disposed() {
            return;
        }
        self.state.write().await.outbox_error = Some(friendly_error_message(error));
    }
}
