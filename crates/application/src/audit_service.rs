use std::sync::Arc;

use softmobile_core::{AppError, AppResult, CorporateReason, NonEmptyString};
use softmobile_domain::{AuditAcknowledgement, AuditLogEntry, AuditReminderSummary};
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use tracing::{info, warn};

use crate::audit_reminder_scheduler::{
    AuditReminderNotice, AuditReminderSchedule, AuditReminderScheduler, AuditReminderState,
};
use crate::dashboard_ports::{AcknowledgeReminderInput, AuditApi};
use crate::error_messages::friendly_error_message;
use crate::session::DashboardSession;

/// Audit view shared with the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditSnapshot {
    /// Latest persistent alert summary.
    pub reminders: Option<AuditReminderSummary>,
    /// Operator-facing reminder error.
    pub reminders_error: Option<String>,
    /// Recent audit log entries.
    pub audit_log: Vec<AuditLogEntry>,
    /// Operator-facing audit log error.
    pub audit_log_error: Option<String>,
}

impl AuditSnapshot {
    /// Returns the pending alert count, zero when nothing was fetched yet.
    #[must_use]
    pub fn pending_alerts_count(&self) -> u32 {
        self.reminders
            .as_ref()
            .map_or(0, |summary| summary.pending_count)
    }
}

/// Audit reminders, acknowledgements and recent audit activity.
#[derive(Clone)]
pub struct AuditService {
    api: Arc<dyn AuditApi>,
    state: Arc<RwLock<AuditSnapshot>>,
    scheduler: Arc<Mutex<AuditReminderScheduler>>,
    session: DashboardSession,
}

impl AuditService {
    /// Creates an audit service bound to one dashboard session.
    #[must_use]
    pub fn new(
        api: Arc<dyn AuditApi>,
        schedule: AuditReminderSchedule,
        session: DashboardSession,
    ) -> Self {
        Self {
            api,
            state: Arc::new(RwLock::new(AuditSnapshot::default())),
            scheduler: Arc::new(Mutex::new(AuditReminderScheduler::new(schedule))),
            session,
        }
    }

    /// Returns a copy of the current audit view.
    pub async fn snapshot(&self) -> AuditSnapshot {
        self.state.read().await.clone()
    }

    /// Returns the reminder scheduler state.
    pub async fn reminder_state(&self) -> AuditReminderState {
        self.scheduler.lock().await.state()
    }

    /// Returns the next reminder deadline, `None` while idle.
    pub async fn next_reminder_deadline(&self) -> Option<Instant> {
        self.scheduler.lock().await.next_deadline()
    }

    /// Fetches the reminder summary and feeds the scheduler.
    ///
    /// Returns a reminder when entering the reminding state makes one due.
    pub async fn refresh_reminders(&self, now: Instant) -> AppResult<Option<AuditReminderNotice>> {
        let result = self.api.audit_reminders().await;
        if self.session.is_disposed() {
            return Ok(None);
        }

        let summary = match result {
            Ok(summary) => summary,
            Err(error) => {
                warn!(error = %error, "audit reminders unavailable");
                self.state.write().await.reminders_error = Some(friendly_error_message(&error));
                return Err(error);
            }
        };

        let undecoded = summary.undecoded_entries();
        if undecoded > 0 {
            warn!(
                undecoded,
                total = summary.total,
                "audit reminder summary carried entries that could not be decoded"
            );
        }

        let pending_count = summary.pending_count;
        let threshold_minutes = summary.threshold_minutes;
        {
            let mut state = self.state.write().await;
            state.reminders = Some(summary);
            state.reminders_error = None;
        }

        Ok(self
            .scheduler
            .lock()
            .await
            .update_pending(pending_count, threshold_minutes, now))
    }

    /// Acknowledges one persistent alert, then refreshes reminders.
    pub async fn acknowledge_reminder(
        &self,
        input: AcknowledgeReminderInput,
        now: Instant,
    ) -> AppResult<AuditAcknowledgement> {
        let reason = CorporateReason::new(input.reason)?;
        let entity_type = NonEmptyString::new(input.entity_type.trim())?;
        let entity_id = NonEmptyString::new(input.entity_id.trim())?;
        let note = input
            .note
            .map(|note| note.trim().to_owned())
            .filter(|note| !note.is_empty());

        let acknowledgement = self
            .api
            .acknowledge_reminder(
                entity_type.as_str(),
                entity_id.as_str(),
                note.as_deref(),
                &reason,
            )
            .await
            .inspect_err(|error| {
                warn!(
                    entity_type = %entity_type.as_str(),
                    entity_id = %entity_id.as_str(),
                    error = %error,
                    "audit reminder acknowledgement failed"
                );
            })?;

        info!(
            entity_type = %acknowledgement.entity_type,
            entity_id = %acknowledgement.entity_id,
            "audit reminder acknowledged"
        );

        if let Err(error) = self.refresh_reminders(now).await {
            warn!(error = %error, "reminder refresh after acknowledgement failed");
        }
        Ok(acknowledgement)
    }

    /// Suppresses reminders for the configured snooze window.
    pub async fn snooze_reminders(&self, now: Instant) -> AppResult<()> {
        if self.scheduler.lock().await.snooze(now) {
            Ok(())
        } else {
            Err(AppError::Validation(
                "there are no pending reminders to snooze".to_owned(),
            ))
        }
    }

    /// Advances the scheduler and returns a reminder when one is due.
    pub async fn poll_reminders(&self, now: Instant) -> Option<AuditReminderNotice> {
        if self.session.is_disposed() {
            return None;
        }
        self.scheduler.lock().await.poll(now)
    }

    /// Fetches the most recent audit log entries.
    pub async fn refresh_audit_log(&self, limit: u32) -> AppResult<()> {
        if limit == 0 {
            return Err(AppError::Validation(
                "limit must be greater than zero".to_owned(),
            ));
        }

        let result = self.api.list_audit_logs(limit).await;
        if self.session.is_disposed() {
            return Ok(());
        }

        let mut state = self.state.write().await;
        match result {
            Ok(entries) => {
                state.audit_log = entries;
                state.audit_log_error = None;
                Ok(())
            }
            Err(error) => {
                warn!(error = %error, "audit log unavailable");
                state.audit_log_error = Some(friendly_error_message(&error));
                Err(error)
            }
        }
    }
}
