use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;
use softmobile_application::AuditApi;
use softmobile_core::{AppResult, CorporateReason};
use softmobile_domain::{AuditAcknowledgement, AuditLogEntry, AuditReminderSummary};

use super::HttpSoftmobileClient;

#[derive(Debug, Serialize)]
pub(super) struct AcknowledgeReminderRequest<'a> {
    pub(super) entity_type: &'a str,
    pub(super) entity_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) note: Option<&'a str>,
}

#[async_trait]
impl AuditApi for HttpSoftmobileClient {
    async fn audit_reminders(&self) -> AppResult<AuditReminderSummary> {
        self.get_json(self.endpoint("reports/audit/reminders")?)
            .await
    }

    async fn acknowledge_reminder(
        &self,
        entity_type: &str,
        entity_id: &str,
        note: Option<&str>,
        reason: &CorporateReason,
    ) -> AppResult<AuditAcknowledgement> {
        self.send_json(
            Method::POST,
            self.endpoint("reports/audit/acknowledge")?,
            &AcknowledgeReminderRequest {
                entity_type,
                entity_id,
                note,
            },
            reason,
        )
        .await
    }

    async fn list_audit_logs(&self, limit: u32) -> AppResult<Vec<AuditLogEntry>> {
        let mut url = self.endpoint("reports/audit")?;
        url.query_pairs_mut()
            .append_pair("limit", limit.to_string().as_str());
        self.get_json(url).await
    }
}
