use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;
use softmobile_core::{AppError, AppResult, CorporateReason};
use softmobile_domain::{
    AuditAcknowledgement, AuditLogEntry, AuditReminderEntry, AuditReminderEntryPayload,
    AuditReminderStatus, AuditReminderSummary, Device, InventoryMetrics, InventoryTotals,
    ObservabilitySnapshot, Store, SyncHybridBreakdown, SyncHybridComponentProgress,
    SyncHybridComponents, SyncHybridForecast, SyncHybridModuleBreakdownItem, SyncHybridOverview,
    SyncHybridProgress, SyncOutboxEntry, SyncOutboxPriority, SyncOutboxStatsEntry,
    SyncOutboxStatus, SyncQueueSummary, SystemHealth,
};
use tokio::sync::Mutex;

use crate::dashboard_ports::{AuditApi, InventoryApi, PreferenceStore, ReasonPrompt, SyncApi};

pub(crate) fn timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 9, 30, 0)
        .single()
        .unwrap_or_default()
}

pub(crate) fn outbox_entry(id: i64, conflict_flag: bool) -> SyncOutboxEntry {
    SyncOutboxEntry {
        id,
        entity_type: "device".to_owned(),
        entity_id: format!("{}", id * 10),
        operation: "UPSERT".to_owned(),
        payload: json!({"quantity": 3}),
        attempt_count: 1,
        last_attempt_at: Some(timestamp()),
        status: SyncOutboxStatus::Pending,
        priority: SyncOutboxPriority::Normal,
        conflict_flag,
        version: 1,
        error_message: None,
        created_at: timestamp(),
        updated_at: timestamp(),
    }
}

pub(crate) fn progress(percent: f64) -> SyncHybridProgress {
    SyncHybridProgress {
        percent,
        total: 10,
        processed: 6,
        pending: 4,
        failed: 0,
        components: SyncHybridComponents::default(),
    }
}

pub(crate) fn forecast(events_per_minute: f64, percent: f64) -> SyncHybridForecast {
    SyncHybridForecast {
        generated_at: timestamp(),
        lookback_minutes: 60,
        processed_recent: 12,
        events_per_minute,
        backlog_total: 4,
        estimated_minutes_remaining: Some(2.0),
        estimated_completion: None,
        attempts_total: 14,
        attempts_successful: 12,
        progress: progress(percent),
    }
}

pub(crate) fn breakdown_item(label: &str) -> SyncHybridModuleBreakdownItem {
    SyncHybridModuleBreakdownItem {
        module: "inventory".to_owned(),
        label: label.to_owned(),
        queue: SyncHybridComponentProgress {
            total: 4,
            processed: 2,
            pending: 2,
            failed: 0,
        },
        outbox: SyncHybridComponentProgress::default(),
    }
}

fn stats_for(entries: &[SyncOutboxEntry]) -> Vec<SyncOutboxStatsEntry> {
    vec![SyncOutboxStatsEntry {
        entity_type: "device".to_owned(),
        priority: SyncOutboxPriority::Normal,
        total: entries.len() as u64,
        pending: entries.len() as u64,
        failed: 0,
        conflicts: entries.iter().filter(|entry| entry.conflict_flag).count() as u64,
        latest_update: Some(timestamp()),
        oldest_pending: None,
    }]
}

fn unavailable(endpoint: &str) -> AppError {
    AppError::Unavailable(format!("simulated outage for {endpoint}"))
}

/// In-memory sync backend recording every call.
#[derive(Default)]
pub(crate) struct FakeSyncApi {
    pub(crate) outbox: Mutex<Vec<SyncOutboxEntry>>,
    pub(crate) failing: Mutex<HashSet<&'static str>>,
    pub(crate) calls: Mutex<Vec<&'static str>>,
}

impl FakeSyncApi {
    pub(crate) fn with_outbox(entries: Vec<SyncOutboxEntry>) -> Self {
        Self {
            outbox: Mutex::new(entries),
            ..Self::default()
        }
    }

    pub(crate) async fn fail(&self, endpoints: &[&'static str]) {
        self.failing.lock().await.extend(endpoints.iter().copied());
    }

    pub(crate) async fn recover(&self) {
        self.failing.lock().await.clear();
    }

    pub(crate) async fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().await.clone()
    }

    pub(crate) async fn clear_calls(&self) {
        self.calls.lock().await.clear();
    }

    async fn record(&self, endpoint: &'static str) -> AppResult<()> {
        self.calls.lock().await.push(endpoint);
        if self.failing.lock().await.contains(endpoint) {
            return Err(unavailable(endpoint));
        }
        Ok(())
    }
}

#[async_trait]
impl SyncApi for FakeSyncApi {
    async fn list_outbox(&self) -> AppResult<Vec<SyncOutboxEntry>> {
        self.record("outbox").await?;
        Ok(self.outbox.lock().await.clone())
    }

    async fn outbox_stats(&self) -> AppResult<Vec<SyncOutboxStatsEntry>> {
        self.record("stats").await?;
        Ok(stats_for(&self.outbox.lock().await))
    }

    async fn queue_summary(&self) -> AppResult<SyncQueueSummary> {
        self.record("summary").await?;
        let pending = self.outbox.lock().await.len() as u64;
        Ok(SyncQueueSummary {
            percent: 60.0,
            total: 10,
            processed: 6,
            pending,
            failed: 0,
            last_updated: Some(timestamp()),
            oldest_pending: None,
        })
    }

    async fn hybrid_overview(&self) -> AppResult<SyncHybridOverview> {
        self.record("overview").await?;
        Ok(SyncHybridOverview {
            generated_at: timestamp(),
            percent: 75.0,
            total: 10,
            processed: 7,
            pending: 3,
            failed: 0,
            forecast: forecast(10.0, 75.0),
            breakdown: vec![breakdown_item("overview")],
        })
    }

    async fn hybrid_forecast(&self) -> AppResult<SyncHybridForecast> {
        self.record("forecast").await?;
        Ok(forecast(4.0, 50.0))
    }

    async fn hybrid_breakdown(&self) -> AppResult<SyncHybridBreakdown> {
        self.record("breakdown").await?;
        Ok(SyncHybridBreakdown {
            generated_at: timestamp(),
            modules: vec![breakdown_item("legacy")],
        })
    }

    async fn hybrid_progress(&self) -> AppResult<SyncHybridProgress> {
        self.record("progress").await?;
        Ok(progress(25.0))
    }

    async fn retry_outbox(
        &self,
        entry_ids: &[i64],
        _reason: &CorporateReason,
    ) -> AppResult<Vec<SyncOutboxEntry>> {
        self.record("retry").await?;
        let mut outbox = self.outbox.lock().await;
        let mut retried = Vec::new();
        for entry in outbox.iter_mut() {
            if entry_ids.contains(&entry.id) {
                entry.attempt_count += 1;
                entry.status = SyncOutboxStatus::Pending;
                retried.push(entry.clone());
            }
        }
        Ok(retried)
    }

    async fn update_outbox_priority(
        &self,
        entry_id: i64,
        priority: SyncOutboxPriority,
        _reason: &CorporateReason,
    ) -> AppResult<SyncOutboxEntry> {
        self.record("priority").await?;
        let mut outbox = self.outbox.lock().await;
        let entry = outbox
            .iter_mut()
            .find(|entry| entry.id == entry_id)
            .ok_or_else(|| AppError::NotFound(format!("outbox entry {entry_id}")))?;
        entry.priority = priority;
        entry.version += 1;
        Ok(entry.clone())
    }

    async fn resolve_outbox_conflicts(
        &self,
        entry_ids: &[i64],
        _reason: &CorporateReason,
    ) -> AppResult<Vec<SyncOutboxEntry>> {
        self.record("resolve").await?;
        let mut outbox = self.outbox.lock().await;
        for entry in outbox.iter_mut() {
            if entry_ids.contains(&entry.id) {
                entry.conflict_flag = false;
            }
        }
        Ok(outbox.clone())
    }

    async fn observability_snapshot(&self) -> AppResult<ObservabilitySnapshot> {
        self.record("observability").await?;
        Ok(ObservabilitySnapshot {
            generated_at: timestamp(),
            latency: Default::default(),
            errors: Default::default(),
            sync: Default::default(),
            notifications: Vec::new(),
        })
    }
}

pub(crate) fn pending_reminder(entity_id: &str) -> AuditReminderEntryPayload {
    AuditReminderEntryPayload {
        entity_type: "device".to_owned(),
        entity_id: entity_id.to_owned(),
        first_seen: timestamp(),
        last_seen: timestamp(),
        occurrences: 3,
        latest_action: "stock_adjustment_failed".to_owned(),
        latest_details: None,
        status: AuditReminderStatus::Pending,
        acknowledged_at: None,
        acknowledged_by_id: None,
        acknowledged_by_name: None,
        acknowledged_note: None,
    }
}

/// In-memory audit backend recording every call.
#[derive(Default)]
pub(crate) struct FakeAuditApi {
    pub(crate) reminders: Mutex<Vec<AuditReminderEntryPayload>>,
    pub(crate) summary_body: Mutex<Option<serde_json::Value>>,
    pub(crate) failing: Mutex<HashSet<&'static str>>,
    pub(crate) calls: Mutex<Vec<&'static str>>,
}

impl FakeAuditApi {
    pub(crate) fn with_pending(entity_ids: &[&str]) -> Self {
        Self {
            reminders: Mutex::new(entity_ids.iter().map(|id| pending_reminder(id)).collect()),
            ..Self::default()
        }
    }

    pub(crate) fn with_summary_body(body: serde_json::Value) -> Self {
        Self {
            summary_body: Mutex::new(Some(body)),
            ..Self::default()
        }
    }

    pub(crate) async fn fail(&self, endpoints: &[&'static str]) {
        self.failing.lock().await.extend(endpoints.iter().copied());
    }

    pub(crate) async fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().await.clone()
    }

    async fn record(&self, endpoint: &'static str) -> AppResult<()> {
        self.calls.lock().await.push(endpoint);
        if self.failing.lock().await.contains(endpoint) {
            return Err(unavailable(endpoint));
        }
        Ok(())
    }
}

#[async_trait]
impl AuditApi for FakeAuditApi {
    async fn audit_reminders(&self) -> AppResult<AuditReminderSummary> {
        self.record("reminders").await?;
        if let Some(body) = self.summary_body.lock().await.clone() {
            return serde_json::from_value(body)
                .map_err(|error| AppError::Internal(format!("invalid summary body: {error}")));
        }
        let payloads = self.reminders.lock().await.clone();
        let pending_count = payloads
            .iter()
            .filter(|payload| payload.status == AuditReminderStatus::Pending)
            .count() as u32;
        let total = payloads.len() as u32;
        let persistent = payloads.into_iter().map(AuditReminderEntry::from).collect();

        Ok(AuditReminderSummary {
            threshold_minutes: 15,
            min_occurrences: 1,
            total,
            pending_count,
            acknowledged_count: total - pending_count,
            persistent,
        })
    }

    async fn acknowledge_reminder(
        &self,
        entity_type: &str,
        entity_id: &str,
        note: Option<&str>,
        _reason: &CorporateReason,
    ) -> AppResult<AuditAcknowledgement> {
        self.record("acknowledge").await?;
        let mut reminders = self.reminders.lock().await;
        let reminder = reminders
            .iter_mut()
            .find(|payload| payload.entity_type == entity_type && payload.entity_id == entity_id)
            .ok_or_else(|| AppError::NotFound(format!("reminder {entity_type}:{entity_id}")))?;
        reminder.status = AuditReminderStatus::Acknowledged;
        reminder.acknowledged_at = Some(timestamp());
        reminder.acknowledged_note = note.map(str::to_owned);

        Ok(AuditAcknowledgement {
            entity_type: entity_type.to_owned(),
            entity_id: entity_id.to_owned(),
            acknowledged_at: timestamp(),
            acknowledged_by_id: Some(1),
            acknowledged_by_name: Some("Admin".to_owned()),
            note: note.map(str::to_owned),
        })
    }

    async fn list_audit_logs(&self, limit: u32) -> AppResult<Vec<AuditLogEntry>> {
        self.record("audit_logs").await?;
        Ok((1..=i64::from(limit.min(3)))
            .map(|id| AuditLogEntry {
                id,
                action: "sync_outbox_retry".to_owned(),
                entity_type: "sync_outbox".to_owned(),
                entity_id: format!("{id}"),
                details: None,
                performed_by_id: Some(1),
                created_at: timestamp(),
            })
            .collect())
    }
}

/// In-memory inventory backend recording every call.
#[derive(Default)]
pub(crate) struct FakeInventoryApi {
    pub(crate) stores: Vec<Store>,
    pub(crate) devices: HashMap<i64, Vec<Device>>,
    pub(crate) failing: Mutex<HashSet<&'static str>>,
    pub(crate) calls: Mutex<Vec<&'static str>>,
}

pub(crate) fn store(id: i64, name: &str) -> Store {
    Store {
        id,
        name: name.to_owned(),
        location: Some("CDMX".to_owned()),
        timezone: "America/Mexico_City".to_owned(),
        inventory_value: 125_000.0,
        created_at: None,
    }
}

pub(crate) fn device(id: i64, store_id: i64, name: &str, sku: &str) -> Device {
    Device {
        id,
        store_id,
        sku: sku.to_owned(),
        name: name.to_owned(),
        quantity: 5,
        unit_price: 4_999.0,
        imei: None,
        serial: None,
    }
}

impl FakeInventoryApi {
    pub(crate) async fn fail(&self, endpoints: &[&'static str]) {
        self.failing.lock().await.extend(endpoints.iter().copied());
    }

    pub(crate) async fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().await.clone()
    }

    async fn record(&self, endpoint: &'static str) -> AppResult<()> {
        self.calls.lock().await.push(endpoint);
        if self.failing.lock().await.contains(endpoint) {
            return Err(unavailable(endpoint));
        }
        Ok(())
    }
}

#[async_trait]
impl InventoryApi for FakeInventoryApi {
    async fn system_health(&self) -> AppResult<SystemHealth> {
        self.record("health").await?;
        Ok(SystemHealth {
            status: "ok".to_owned(),
            version: Some("2.2.0".to_owned()),
        })
    }

    async fn list_stores(&self) -> AppResult<Vec<Store>> {
        self.record("stores").await?;
        Ok(self.stores.clone())
    }

    async fn list_store_devices(&self, store_id: i64) -> AppResult<Vec<Device>> {
        self.record("devices").await?;
        Ok(self.devices.get(&store_id).cloned().unwrap_or_default())
    }

    async fn inventory_metrics(&self) -> AppResult<InventoryMetrics> {
        self.record("metrics").await?;
        Ok(InventoryMetrics {
            totals: InventoryTotals {
                stores: self.stores.len() as u64,
                devices: self.devices.values().map(Vec::len).sum::<usize>() as u64,
                total_units: 0,
                total_value: 0.0,
            },
            top_stores: Vec::new(),
            low_stock_devices: Vec::new(),
        })
    }
}

/// Reason prompt returning a canned answer and counting invocations.
#[derive(Default)]
pub(crate) struct FakeReasonPrompt {
    pub(crate) answer: Option<String>,
    pub(crate) prompts: Mutex<u32>,
}

impl FakeReasonPrompt {
    pub(crate) fn answering(answer: &str) -> Self {
        Self {
            answer: Some(answer.to_owned()),
            prompts: Mutex::new(0),
        }
    }

    pub(crate) async fn prompt_count(&self) -> u32 {
        *self.prompts.lock().await
    }
}

#[async_trait]
impl ReasonPrompt for FakeReasonPrompt {
    async fn request_reason(&self, _message: &str) -> Option<String> {
        *self.prompts.lock().await += 1;
        self.answer.clone()
    }
}

/// Preference store backed by a map.
#[derive(Default)]
pub(crate) struct FakePreferenceStore {
    pub(crate) values: Mutex<HashMap<String, String>>,
}

#[async_trait]
impl PreferenceStore for FakePreferenceStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.values.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.values
            .lock()
            .await
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
