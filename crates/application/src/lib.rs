//! Application services and ports.

#![forbid(unsafe_code)]

mod audit_reminder_scheduler;
mod audit_service;
mod dashboard_ports;
mod dashboard_service;
mod error_messages;
mod refresh_policy;
mod session;
mod sync_service;
mod toast_queue;

#[cfg(test)]
mod test_support;

pub use audit_reminder_scheduler::{
    AuditReminderNotice, AuditReminderSchedule, AuditReminderScheduler, AuditReminderState,
    DEFAULT_REMINDER_INTERVAL, DEFAULT_REMINDER_SNOOZE,
};
pub use audit_service::{AuditService, AuditSnapshot};
pub use dashboard_ports::{
    AcknowledgeReminderInput, AuditApi, InventoryApi, LAST_MODULE_KEY, PreferenceStore,
    ReasonPrompt, SIDEBAR_COLLAPSED_KEY, SyncApi,
};
pub use dashboard_service::{DashboardPorts, DashboardService, DashboardSettings, DashboardSnapshot};
pub use error_messages::friendly_error_message;
pub use refresh_policy::{DEFAULT_REFRESH_INTERVAL, PageVisibility, RefreshPolicy};
pub use session::DashboardSession;
pub use sync_service::{ConflictResolutionOutcome, SyncRefreshSource, SyncService, SyncSnapshot};
pub use toast_queue::{DEFAULT_TOAST_TTL, ToastQueue};
