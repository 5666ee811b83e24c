use async_trait::async_trait;
use softmobile_core::{AppResult, CorporateReason};
use softmobile_domain::{AuditAcknowledgement, AuditLogEntry, AuditReminderSummary};

/// Input for acknowledging one persistent alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcknowledgeReminderInput {
    /// Entity family of the alert.
    pub entity_type: String,
    /// Entity identifier of the alert.
    pub entity_id: String,
    /// Corporate reason typed by the operator.
    pub reason: String,
    /// Optional operator note stored with the acknowledgement.
    pub note: Option<String>,
}

/// Port for the backend audit endpoints.
#[async_trait]
pub trait AuditApi: Send + Sync {
    /// Returns the persistent alert summary.
    async fn audit_reminders(&self) -> AppResult<AuditReminderSummary>;

    /// Acknowledges one persistent alert.
    async fn acknowledge_reminder(
        &self,
        entity_type: &str,
        entity_id: &str,
        note: Option<&str>,
        reason: &CorporateReason,
    ) -> AppResult<AuditAcknowledgement>;

    /// Lists the most recent audit log entries.
    async fn list_audit_logs(&self, limit: u32) -> AppResult<Vec<AuditLogEntry>>;
}
