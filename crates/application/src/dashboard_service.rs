use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use softmobile_core::{AppError, AppResult, NonEmptyString};
use softmobile_domain::{
    Device, InventoryMetrics, Store, SystemHealth, ToastMessage, ToastVariant, format_currency,
};
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use tracing::{info, warn};

use crate::audit_reminder_scheduler::{AuditReminderNotice, AuditReminderSchedule};
use crate::audit_service::AuditService;
use crate::dashboard_ports::{
    AuditApi, InventoryApi, LAST_MODULE_KEY, PreferenceStore, SIDEBAR_COLLAPSED_KEY, SyncApi,
};
use crate::error_messages::friendly_error_message;
use crate::session::DashboardSession;
use crate::sync_service::{SyncRefreshSource, SyncService};
use crate::toast_queue::{DEFAULT_TOAST_TTL, ToastQueue};

mod actions;

/// Backend ports consumed by the dashboard.
#[derive(Clone)]
pub struct DashboardPorts {
    /// Sync and observability endpoints.
    pub sync_api: Arc<dyn SyncApi>,
    /// Audit endpoints.
    pub audit_api: Arc<dyn AuditApi>,
    /// Inventory and system endpoints.
    pub inventory_api: Arc<dyn InventoryApi>,
    /// Operator preference storage.
    pub preference_store: Arc<dyn PreferenceStore>,
}

/// Timing settings of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardSettings {
    /// Reminder cadence and snooze window.
    pub reminder_schedule: AuditReminderSchedule,
    /// Toast lifetime.
    pub toast_ttl: Duration,
    /// Number of audit log entries loaded with the dashboard.
    pub audit_log_limit: u32,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            reminder_schedule: AuditReminderSchedule::default(),
            toast_ttl: DEFAULT_TOAST_TTL,
            audit_log_limit: 50,
        }
    }
}

/// Inventory, system and selection state shared by every page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSnapshot {
    /// Selected store.
    pub selected_store_id: Option<i64>,
    /// Free-text inventory search.
    pub search_term: String,
    /// Backend health.
    pub health: Option<SystemHealth>,
    /// Known stores.
    pub stores: Vec<Store>,
    /// Devices of the selected store.
    pub devices: Vec<Device>,
    /// Inventory metrics.
    pub metrics: Option<InventoryMetrics>,
    /// Operator-facing inventory error.
    pub inventory_error: Option<String>,
    /// Completion time of the last full refresh.
    pub last_refresh_at: Option<DateTime<Utc>>,
}

impl DashboardSnapshot {
    /// Returns the selected store.
    #[must_use]
    pub fn selected_store(&self) -> Option<&Store> {
        self.selected_store_id
            .and_then(|store_id| self.stores.iter().find(|store| store.id == store_id))
    }

    /// Returns devices of the selected store matching the search term.
    #[must_use]
    pub fn filtered_devices(&self) -> Vec<&Device> {
        self.devices
            .iter()
            .filter(|device| device.matches_search(self.search_term.as_str()))
            .collect()
    }
}

/// Single source of truth composing inventory, sync, audit and toast state.
#[derive(Clone)]
pub struct DashboardService {
    inventory_api: Arc<dyn InventoryApi>,
    preference_store: Arc<dyn PreferenceStore>,
    sync: SyncService,
    audit: AuditService,
    state: Arc<RwLock<DashboardSnapshot>>,
    toasts: Arc<Mutex<ToastQueue>>,
    settings: DashboardSettings,
    session: DashboardSession,
}

impl DashboardService {
    /// Creates a dashboard with a fresh session.
    #[must_use]
    pub fn new(ports: DashboardPorts, settings: DashboardSettings) -> Self {
        let session = DashboardSession::new();
        Self {
            inventory_api: ports.inventory_api,
            preference_store: ports.preference_store,
            sync: SyncService::new(ports.sync_api, session.clone()),
            audit: AuditService::new(ports.audit_api, settings.reminder_schedule, session.clone()),
            state: Arc::new(RwLock::new(DashboardSnapshot::default())),
            toasts: Arc::new(Mutex::new(ToastQueue::new(settings.toast_ttl))),
            settings,
            session,
        }
    }

    /// Returns the sync aggregator.
    #[must_use]
    pub fn sync(&self) -> &SyncService {
        &self.sync
    }

    /// Returns the audit service.
    #[must_use]
    pub fn audit(&self) -> &AuditService {
        &self.audit
    }

    /// Returns the timing settings.
    #[must_use]
    pub fn settings(&self) -> DashboardSettings {
        self.settings
    }

    /// Returns a copy of the inventory and selection state.
    pub async fn snapshot(&self) -> DashboardSnapshot {
        self.state.read().await.clone()
    }

    /// Returns true once the dashboard has been disposed.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.session.is_disposed()
    }

    /// Disposes the session; late results are dropped and timers stop.
    pub fn dispose(&self) {
        info!("dashboard session disposed");
        self.session.dispose();
    }

    /// Loads every dashboard section in parallel.
    ///
    /// Each section degrades on its own; a failing endpoint never blocks the
    /// others. Every degraded section keeps its inline error and is reported
    /// once as an error toast.
    pub async fn initial_load(&self, now: Instant) {
        let (health, stores, metrics, outbox_source, observability, reminders, audit_log) =
            tokio::join!(
                self.inventory_api.system_health(),
                self.inventory_api.list_stores(),
                self.inventory_api.inventory_metrics(),
                self.sync.refresh_outbox(),
                self.sync.refresh_observability(),
                self.audit.refresh_reminders(now),
                self.audit.refresh_audit_log(self.settings.audit_log_limit)
            );

        if self.session.is_disposed() {
            return;
        }

        let mut degraded = Vec::new();
        if outbox_source == SyncRefreshSource::ProgressOnly {
            if let Some(message) = self.sync.snapshot().await.outbox_error {
                degraded.push(message);
            }
        }
        if let Err(error) = observability {
            warn!(error = %error, "observability section degraded");
            degraded.push(friendly_error_message(&error));
        }
        if let Err(error) = audit_log {
            warn!(error = %error, "audit log section degraded");
            degraded.push(friendly_error_message(&error));
        }

        let selected_store_id = {
            let mut state = self.state.write().await;
            let mut inventory_error = None;

            match health {
                Ok(health) => {
                    if !health.is_healthy() {
                        warn!(status = %health.status, "backend reports degraded health");
                    }
                    state.health = Some(health);
                }
                Err(error) => {
                    warn!(error = %error, "system health unavailable");
                    state.health = None;
                }
            }

            match stores {
                Ok(stores) => {
                    if state
                        .selected_store_id
                        .is_some_and(|store_id| !stores.iter().any(|store| store.id == store_id))
                    {
                        state.selected_store_id = None;
                        state.devices.clear();
                    }
                    state.stores = stores;
                }
                Err(error) => {
                    warn!(error = %error, "store list unavailable");
                    inventory_error = Some(friendly_error_message(&error));
                }
            }

            match metrics {
                Ok(metrics) => state.metrics = Some(metrics),
                Err(error) => {
                    warn!(error = %error, "inventory metrics unavailable");
                    inventory_error.get_or_insert_with(|| friendly_error_message(&error));
                }
            }

            degraded.extend(inventory_error.clone());
            state.inventory_error = inventory_error;
            state.last_refresh_at = Some(Utc::now());
            state.selected_store_id
        };

        if let Some(store_id) = selected_store_id {
            if let Err(error) = self.load_store_devices(store_id).await {
                warn!(store_id, error = %error, "store devices unavailable");
                degraded.push(friendly_error_message(&error));
            }
        }

        match reminders {
            Ok(Some(notice)) => self.announce_reminder(notice, now).await,
            Ok(None) => {}
            Err(error) => {
                warn!(error = %error, "audit reminders section degraded");
                degraded.push(friendly_error_message(&error));
            }
        }

        let mut reported = Vec::with_capacity(degraded.len());
        for message in degraded {
            if !reported.contains(&message) {
                self.push_toast_at(message.clone(), ToastVariant::Error, now)
                    .await;
                reported.push(message);
            }
        }
    }

    /// Periodic refresh entry point; reloads every section.
    pub async fn refresh(&self, now: Instant) {
        self.initial_load(now).await;
    }

    /// Selects a store, or clears the selection, and loads its devices.
    pub async fn select_store(&self, store_id: Option<i64>) -> AppResult<()> {
        let Some(store_id) = store_id else {
            let mut state = self.state.write().await;
            state.selected_store_id = None;
            state.devices.clear();
            return Ok(());
        };

        {
            let state = self.state.read().await;
            if !state.stores.is_empty() && !state.stores.iter().any(|store| store.id == store_id)
            {
                return Err(AppError::NotFound(format!("store {store_id}")));
            }
        }

        self.state.write().await.selected_store_id = Some(store_id);
        self.load_store_devices(store_id).await
    }

    /// Updates the free-text inventory search.
    pub async fn set_search_term(&self, term: impl Into<String>) {
        self.state.write().await.search_term = term.into();
    }

    /// Returns devices of the selected store matching the search term.
    pub async fn filtered_devices(&self) -> Vec<Device> {
        self.state
            .read()
            .await
            .filtered_devices()
            .into_iter()
            .cloned()
            .collect()
    }

    /// Formats an amount with the dashboard currency.
    #[must_use]
    pub fn format_currency(&self, amount: f64) -> String {
        format_currency(amount)
    }

    /// Queues a toast and returns its identifier.
    pub async fn push_toast(&self, message: impl Into<String>, variant: ToastVariant) -> u64 {
        self.push_toast_at(message, variant, Instant::now()).await
    }

    /// Removes a toast before it expires.
    pub async fn dismiss_toast(&self, id: u64) -> bool {
        self.toasts.lock().await.dismiss(id)
    }

    /// Drops expired toasts and returns them.
    pub async fn expire_toasts(&self, now: Instant) -> Vec<ToastMessage> {
        self.toasts.lock().await.expire(now)
    }

    /// Returns visible toasts, oldest first.
    pub async fn toasts(&self) -> Vec<ToastMessage> {
        self.toasts.lock().await.active()
    }

    /// Returns the instant the next toast expires.
    pub async fn next_toast_expiry(&self) -> Option<Instant> {
        self.toasts.lock().await.next_expiry()
    }

    /// Returns whether the sidebar was left collapsed.
    pub async fn sidebar_collapsed(&self) -> AppResult<bool> {
        Ok(self
            .preference_store
            .get(SIDEBAR_COLLAPSED_KEY)
            .await?
            .is_some_and(|value| value == "true"))
    }

    /// Stores the sidebar collapsed flag.
    pub async fn set_sidebar_collapsed(&self, collapsed: bool) -> AppResult<()> {
        self.preference_store
            .set(
                SIDEBAR_COLLAPSED_KEY,
                if collapsed { "true" } else { "false" },
            )
            .await
    }

    /// Returns the last visited module.
    pub async fn last_module(&self) -> AppResult<Option<String>> {
        Ok(self
            .preference_store
            .get(LAST_MODULE_KEY)
            .await?
            .filter(|value| !value.trim().is_empty()))
    }

    /// Stores the last visited module.
    pub async fn set_last_module(&self, module: &str) -> AppResult<()> {
        let module = NonEmptyString::new(module.trim())?;
        self.preference_store
            .set(LAST_MODULE_KEY, module.as_str())
            .await
    }

    async fn load_store_devices(&self, store_id: i64) -> AppResult<()> {
        let result = self.inventory_api.list_store_devices(store_id).await;
        if self.session.is_disposed() {
            return Ok(());
        }

        let mut state = self.state.write().await;
        if state.selected_store_id != Some(store_id) {
            return Ok(());
        }

        match result {
            Ok(devices) => {
                state.devices = devices;
                Ok(())
            }
            Err(error) => {
                state.inventory_error = Some(friendly_error_message(&error));
                Err(error)
            }
        }
    }

    async fn push_toast_at(
        &self,
        message: impl Into<String>,
        variant: ToastVariant,
        now: Instant,
    ) -> u64 {
        let message = message.into();
        info!(variant = variant.as_str(), message = %message, "toast");
        self.toasts.lock().await.push(message, variant, now)
    }

    async fn announce_reminder(&self, notice: AuditReminderNotice, now: Instant) {
        self.push_toast_at(notice.message(), ToastVariant::Warning, now)
            .await;
    }
}
