//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod audit;
mod currency;
mod inventory;
mod observability;
mod sync;
mod toast;

pub use audit::{
    AuditAcknowledgement, AuditLogEntry, AuditReminderAcknowledgement, AuditReminderEntry,
    AuditReminderEntryPayload, AuditReminderStatus, AuditReminderSummary, AuditSeverity,
};
pub use currency::format_currency;
pub use inventory::{
    Device, InventoryMetrics, InventoryTotals, LowStockDevice, Store, StoreValueMetric,
    SystemHealth,
};
pub use observability::{
    ObservabilityErrorSummary, ObservabilityLatencySample, ObservabilityLatencySummary,
    ObservabilityNotification, ObservabilitySnapshot, ObservabilitySyncSummary,
};
pub use sync::{
    SyncHybridBreakdown, SyncHybridComponentProgress, SyncHybridComponents, SyncHybridForecast,
    SyncHybridModuleBreakdownItem, SyncHybridOverview, SyncHybridProgress, SyncOutboxEntry,
    SyncOutboxPriority, SyncOutboxStatsEntry, SyncOutboxStatus, SyncQueueSummary,
    conflict_entries,
};
pub use toast::{ToastMessage, ToastVariant};
