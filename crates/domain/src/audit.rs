use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Acknowledgement status of one persistent alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditReminderStatus {
    /// Alert is still open.
    Pending,
    /// An operator acknowledged the alert.
    Acknowledged,
}

/// Acknowledgement metadata attached to a persistent alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditReminderAcknowledgement {
    /// Acknowledgement timestamp.
    pub acknowledged_at: DateTime<Utc>,
    /// Operator id.
    pub acknowledged_by_id: Option<i64>,
    /// Operator display name.
    pub acknowledged_by_name: Option<String>,
    /// Operator note.
    pub note: Option<String>,
}

/// Wire shape of a persistent alert as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditReminderEntryPayload {
    /// Entity family of the alert.
    pub entity_type: String,
    /// Entity identifier of the alert.
    pub entity_id: String,
    /// First occurrence.
    pub first_seen: DateTime<Utc>,
    /// Latest occurrence.
    pub last_seen: DateTime<Utc>,
    /// Number of occurrences inside the threshold window.
    pub occurrences: u32,
    /// Action of the latest occurrence.
    pub latest_action: String,
    /// Details of the latest occurrence.
    #[serde(default)]
    pub latest_details: Option<String>,
    /// Acknowledgement status.
    pub status: AuditReminderStatus,
    /// Acknowledgement timestamp.
    #[serde(default)]
    pub acknowledged_at: Option<DateTime<Utc>>,
    /// Acknowledging operator id.
    #[serde(default)]
    pub acknowledged_by_id: Option<i64>,
    /// Acknowledging operator name.
    #[serde(default)]
    pub acknowledged_by_name: Option<String>,
    /// Acknowledgement note.
    #[serde(default)]
    pub acknowledged_note: Option<String>,
}

/// A persistent alert derived from the audit log.
///
/// The backend owns the acknowledgement invariant; the client treats
/// `acknowledged_at` as the source of truth for the status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "AuditReminderEntryPayload", into = "AuditReminderEntryPayload")]
pub struct AuditReminderEntry {
    entity_type: String,
    entity_id: String,
    first_seen: DateTime<Utc>,
    last_seen: DateTime<Utc>,
    occurrences: u32,
    latest_action: String,
    latest_details: Option<String>,
    acknowledgement: Option<AuditReminderAcknowledgement>,
}

impl AuditReminderEntry {
    /// Returns the entity family of the alert.
    #[must_use]
    pub fn entity_type(&self) -> &str {
        self.entity_type.as_str()
    }

    /// Returns the entity identifier of the alert.
    #[must_use]
    pub fn entity_id(&self) -> &str {
        self.entity_id.as_str()
    }

    /// Returns the first occurrence timestamp.
    #[must_use]
    pub fn first_seen(&self) -> DateTime<Utc> {
        self.first_seen
    }

    /// Returns the latest occurrence timestamp.
    #[must_use]
    pub fn last_seen(&self) -> DateTime<Utc> {
        self.last_seen
    }

    /// Returns the occurrence count.
    #[must_use]
    pub fn occurrences(&self) -> u32 {
        self.occurrences
    }

    /// Returns the action of the latest occurrence.
    #[must_use]
    pub fn latest_action(&self) -> &str {
        self.latest_action.as_str()
    }

    /// Returns the details of the latest occurrence.
    #[must_use]
    pub fn latest_details(&self) -> Option<&str> {
        self.latest_details.as_deref()
    }

    /// Returns the acknowledgement status.
    #[must_use]
    pub fn status(&self) -> AuditReminderStatus {
        if self.acknowledgement.is_some() {
            AuditReminderStatus::Acknowledged
        } else {
            AuditReminderStatus::Pending
        }
    }

    /// Returns acknowledgement metadata when acknowledged.
    #[must_use]
    pub fn acknowledgement(&self) -> Option<&AuditReminderAcknowledgement> {
        self.acknowledgement.as_ref()
    }

    /// Returns true while the alert waits for an operator.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.acknowledgement.is_none()
    }
}

impl From<AuditReminderEntryPayload> for AuditReminderEntry {
    fn from(payload: AuditReminderEntryPayload) -> Self {
        let acknowledgement =
            payload
                .acknowledged_at
                .map(|acknowledged_at| AuditReminderAcknowledgement {
                    acknowledged_at,
                    acknowledged_by_id: payload.acknowledged_by_id,
                    acknowledged_by_name: payload.acknowledged_by_name,
                    note: payload.acknowledged_note,
                });

        Self {
            entity_type: payload.entity_type,
            entity_id: payload.entity_id,
            first_seen: payload.first_seen,
            last_seen: payload.last_seen,
            occurrences: payload.occurrences,
            latest_action: payload.latest_action,
            latest_details: payload.latest_details,
            acknowledgement,
        }
    }
}

impl From<AuditReminderEntry> for AuditReminderEntryPayload {
    fn from(entry: AuditReminderEntry) -> Self {
        let status = entry.status();
        let (acknowledged_at, acknowledged_by_id, acknowledged_by_name, acknowledged_note) =
            match entry.acknowledgement {
                Some(ack) => (
                    Some(ack.acknowledged_at),
                    ack.acknowledged_by_id,
                    ack.acknowledged_by_name,
                    ack.note,
                ),
                None => (None, None, None, None),
            };

        Self {
            entity_type: entry.entity_type,
            entity_id: entry.entity_id,
            first_seen: entry.first_seen,
            last_seen: entry.last_seen,
            occurrences: entry.occurrences,
            latest_action: entry.latest_action,
            latest_details: entry.latest_details,
            status,
            acknowledged_at,
            acknowledged_by_id,
            acknowledged_by_name,
            acknowledged_note,
        }
    }
}

/// Persistent alert summary used by the reminder scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditReminderSummary {
    /// Window used to group repeated occurrences.
    pub threshold_minutes: u32,
    /// Occurrences required before an alert becomes persistent.
    pub min_occurrences: u32,
    /// All persistent alerts.
    pub total: u32,
    /// Alerts still waiting for an operator.
    pub pending_count: u32,
    /// Alerts already acknowledged.
    pub acknowledged_count: u32,
    /// Alert entries; entries that fail to decode are left out.
    #[serde(default, deserialize_with = "deserialize_reminder_entries")]
    pub persistent: Vec<AuditReminderEntry>,
}

impl AuditReminderSummary {
    /// Returns the number of entries reported in `total` that were not decoded.
    #[must_use]
    pub fn undecoded_entries(&self) -> usize {
        usize::try_from(self.total)
            .unwrap_or(usize::MAX)
            .saturating_sub(self.persistent.len())
    }
}

fn deserialize_reminder_entries<'de, D>(
    deserializer: D,
) -> Result<Vec<AuditReminderEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?;
    Ok(values
        .unwrap_or_default()
        .into_iter()
        .filter_map(|value| serde_json::from_value::<AuditReminderEntry>(value).ok())
        .collect())
}

/// Acknowledgement result returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditAcknowledgement {
    /// Entity family of the acknowledged alert.
    pub entity_type: String,
    /// Entity identifier of the acknowledged alert.
    pub entity_id: String,
    /// Acknowledgement timestamp.
    pub acknowledged_at: DateTime<Utc>,
    /// Operator id.
    #[serde(default)]
    pub acknowledged_by_id: Option<i64>,
    /// Operator display name.
    #[serde(default)]
    pub acknowledged_by_name: Option<String>,
    /// Operator note.
    #[serde(default)]
    pub note: Option<String>,
}

/// Severity derived from an audit action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditSeverity {
    /// Routine operation.
    Info,
    /// Operation worth a second look.
    Warning,
    /// Operation requiring operator attention.
    Critical,
}

const CRITICAL_KEYWORDS: &[&str] = &["critical", "critico", "crítico", "fallo", "failed", "error"];
const WARNING_KEYWORDS: &[&str] = &["warning", "alerta", "conflict", "conflicto", "retry", "reintento"];

impl AuditSeverity {
    /// Classifies an audit action and its details by keyword.
    #[must_use]
    pub fn classify(action: &str, details: Option<&str>) -> Self {
        let haystack = format!("{} {}", action, details.unwrap_or_default()).to_lowercase();
        if CRITICAL_KEYWORDS
            .iter()
            .any(|keyword| haystack.contains(keyword))
        {
            return Self::Critical;
        }

        if WARNING_KEYWORDS
            .iter()
            .any(|keyword| haystack.contains(keyword))
        {
            return Self::Warning;
        }

        Self::Info
    }
}

/// One audit log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    /// Entry identifier.
    pub id: i64,
    /// Audited action.
    pub action: String,
    /// Entity family touched by the action.
    pub entity_type: String,
    /// Entity identifier touched by the action.
    pub entity_id: String,
    /// Free-form details.
    #[serde(default)]
    pub details: Option<String>,
    /// Operator who performed the action.
    #[serde(default)]
    pub performed_by_id: Option<i64>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl AuditLogEntry {
    /// Returns the derived severity of this entry.
    #[must_use]
    pub fn severity(&self) -> AuditSeverity {
        AuditSeverity::classify(self.action.as_str(), self.details.as_deref())
    }
}
