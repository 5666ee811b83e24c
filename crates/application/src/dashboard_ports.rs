mod audit_api;
mod inventory_api;
mod preferences;
mod reason_prompt;
mod sync_api;

pub use audit_api::{AcknowledgeReminderInput, AuditApi};
pub use inventory_api::InventoryApi;
pub use preferences::{LAST_MODULE_KEY, PreferenceStore, SIDEBAR_COLLAPSED_KEY};
pub use reason_prompt::ReasonPrompt;
pub use sync_api::SyncApi;
