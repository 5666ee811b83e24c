use std::time::Duration;

use softmobile_core::{AppError, AppResult};
use softmobile_domain::{AuditAcknowledgement, SyncOutboxEntry, SyncOutboxPriority, ToastVariant};
use tokio::time::Instant;

use super::DashboardService;
use crate::audit_reminder_scheduler::AuditReminderNotice;
use crate::dashboard_ports::{AcknowledgeReminderInput, ReasonPrompt};
use crate::error_messages::friendly_error_message;
use crate::sync_service::ConflictResolutionOutcome;

impl DashboardService {
    /// Changes the priority of one outbox entry.
    pub async fn reprioritize_outbox(
        &self,
        entry_id: i64,
        priority: SyncOutboxPriority,
        reason: &str,
    ) -> AppResult<SyncOutboxEntry> {
        let result = self
            .sync
            .reprioritize_outbox(entry_id, priority, reason)
            .await;
        self.report(&result, |_| {
            format!(
                "Outbox entry #{entry_id} moved to {} priority.",
                priority.as_str()
            )
        })
        .await;
        result
    }

    /// Retries every outbox entry.
    pub async fn retry_outbox(&self, reason: &str) -> AppResult<usize> {
        let result = self.sync.retry_outbox(reason).await;
        match &result {
            Ok(0) => {
                self.push_toast("The outbox is empty.", ToastVariant::Info)
                    .await;
            }
            _ => {
                self.report(&result, |count| format!("{count} outbox entries queued for retry."))
                    .await;
            }
        }
        result
    }

    /// Resolves conflicting outbox entries after operator confirmation.
    pub async fn resolve_outbox_conflicts(
        &self,
        prompt: &dyn ReasonPrompt,
    ) -> AppResult<ConflictResolutionOutcome> {
        let result = self.sync.resolve_outbox_conflicts(prompt).await;
        match &result {
            Ok(ConflictResolutionOutcome::Resolved { message, .. }) => {
                self.push_toast(message.clone(), ToastVariant::Success)
                    .await;
            }
            Ok(ConflictResolutionOutcome::NoConflicts | ConflictResolutionOutcome::Cancelled) => {}
            Err(error) => self.report_error(error).await,
        }
        result
    }

    /// Acknowledges one persistent alert.
    pub async fn acknowledge_reminder(
        &self,
        input: AcknowledgeReminderInput,
        now: Instant,
    ) -> AppResult<AuditAcknowledgement> {
        let result = self.audit.acknowledge_reminder(input, now).await;
        self.report(&result, |ack| {
            format!(
                "Alert {}:{} acknowledged.",
                ack.entity_type, ack.entity_id
            )
        })
        .await;
        result
    }

    /// Snoozes audit reminders.
    pub async fn snooze_reminders(&self, now: Instant) -> AppResult<()> {
        let result = self.audit.snooze_reminders(now).await;
        let snooze = snooze_label(self.settings.reminder_schedule.snooze);
        self.report(&result, |_| format!("Reminders snoozed for {snooze}."))
            .await;
        result
    }

    /// Advances the reminder scheduler and toasts a due reminder.
    pub async fn poll_reminders(&self, now: Instant) -> Option<AuditReminderNotice> {
        let notice = self.audit.poll_reminders(now).await?;
        self.announce_reminder(notice, now).await;
        Some(notice)
    }

    async fn report<T>(&self, result: &AppResult<T>, success: impl FnOnce(&T) -> String) {
        match result {
            Ok(value) => {
                self.push_toast(success(value), ToastVariant::Success)
                    .await;
            }
            Err(error) => self.report_error(error).await,
        }
    }

    async fn report_error(&self, error: &AppError) {
        self.push_toast(friendly_error_message(error), ToastVariant::Error)
            .await;
    }
}

fn snooze_label(snooze: Duration) -> String {
    let seconds = snooze.as_secs();
    match seconds {
        0..60 => format!("{seconds} seconds"),
        60..120 => "1 minute".to_owned(),
        _ if seconds % 60 == 0 => format!("{} minutes", seconds / 60),
        _ => format!("{} minutes {} seconds", seconds / 60, seconds % 60),
    }
}
