use std::sync::Arc;

use softmobile_core::AppError;
use softmobile_domain::SyncOutboxPriority;

use crate::session::DashboardSession;
use crate::test_support::{FakeReasonPrompt, FakeSyncApi, outbox_entry};

use super::{ConflictResolutionOutcome, SyncRefreshSource, SyncService};

fn build_service(api: Arc<FakeSyncApi>) -> SyncService {
    SyncService::new(api, DashboardSession::new())
}

#[tokio::test]
async fn refresh_outbox_prefers_combined_overview() {
    let api = Arc::new(FakeSyncApi::with_outbox(vec![
        outbox_entry(1, false),
        outbox_entry(2, true),
    ]));
    let service = build_service(api.clone());

    let source = service.refresh_outbox().await;
    assert_eq!(source, SyncRefreshSource::Overview);

    let snapshot = service.snapshot().await;
    assert_eq!(snapshot.outbox.len(), 2);
    assert!(snapshot.hybrid_overview.is_some());
    assert_eq!(
        snapshot.hybrid_progress.map(|progress| progress.percent),
        Some(75.0)
    );
    assert_eq!(
        snapshot
            .hybrid_breakdown
            .map(|breakdown| breakdown.modules[0].label.clone()),
        Some("overview".to_owned())
    );
    assert!(snapshot.outbox_error.is_none());
    assert!(!api.calls().await.contains(&"forecast"));
}

#[tokio::test]
async fn refresh_outbox_falls_back_to_separate_endpoints() {
    let api = Arc::new(FakeSyncApi::with_outbox(vec![outbox_entry(1, false)]));
    api.fail(&["overview"]).await;
    let service = build_service(api.clone());

    let source = service.refresh_outbox().await;
    assert_eq!(source, SyncRefreshSource::Legacy);

    let snapshot = service.snapshot().await;
    assert!(snapshot.hybrid_overview.is_none());
    assert_eq!(
        snapshot
            .hybrid_forecast
            .as_ref()
            .map(|forecast| forecast.events_per_minute),
        Some(4.0)
    );
    assert_eq!(
        snapshot
            .hybrid_breakdown
            .map(|breakdown| breakdown.modules[0].label.clone()),
        Some("legacy".to_owned())
    );
    assert_eq!(
        snapshot.hybrid_progress.map(|progress| progress.percent),
        Some(50.0)
    );
    assert_eq!(snapshot.outbox.len(), 1);
    assert!(snapshot.outbox_error.is_none());
}

#[tokio::test]
async fn refresh_outbox_degrades_to_progress_only() {
    let api = Arc::new(FakeSyncApi::with_outbox(vec![outbox_entry(1, false)]));
    let service = build_service(api.clone());
    assert_eq!(service.refresh_outbox().await, SyncRefreshSource::Overview);

    api.fail(&["overview", "breakdown"]).await;
    let source = service.refresh_outbox().await;
    assert_eq!(source, SyncRefreshSource::ProgressOnly);

    let snapshot = service.snapshot().await;
    assert!(snapshot.outbox_error.is_some());
    assert_eq!(
        snapshot.hybrid_progress.map(|progress| progress.percent),
        Some(25.0)
    );
    assert_eq!(snapshot.outbox.len(), 1);
}

#[tokio::test]
async fn refresh_outbox_stores_no_progress_when_everything_fails() {
    let api = Arc::new(FakeSyncApi::default());
    api.fail(&["overview", "forecast", "progress"]).await;
    let service = build_service(api);

    assert_eq!(
        service.refresh_outbox().await,
        SyncRefreshSource::ProgressOnly
    );
    let snapshot = service.snapshot().await;
    assert!(snapshot.hybrid_progress.is_none());
    assert!(snapshot.outbox_error.is_some());
}

#[tokio::test]
async fn successful_tier_clears_previous_error() {
    let api = Arc::new(FakeSyncApi::default());
    api.fail(&["overview", "forecast"]).await;
    let service = build_service(api.clone());
    service.refresh_outbox().await;
    assert!(service.snapshot().await.outbox_error.is_some());

    api.recover().await;
    service.refresh_outbox().await;
    assert!(service.snapshot().await.outbox_error.is_none());
}

#[tokio::test]
async fn reprioritize_with_empty_reason_sends_nothing() {
    let api = Arc::new(FakeSyncApi::with_outbox(vec![outbox_entry(7, false)]));
    let service = build_service(api.clone());

    let result = service
        .reprioritize_outbox(7, SyncOutboxPriority::High, "")
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert!(api.calls().await.is_empty());
}

#[tokio::test]
async fn reprioritize_patches_entry_then_refreshes_stats() {
    let api = Arc::new(FakeSyncApi::with_outbox(vec![
        outbox_entry(7, false),
        outbox_entry(8, false),
    ]));
    let service = build_service(api.clone());
    service.refresh_outbox().await;
    api.clear_calls().await;

    let result = service
        .reprioritize_outbox(7, SyncOutboxPriority::High, "Cliente preferente")
        .await;
    assert!(result.is_ok());

    let snapshot = service.snapshot().await;
    let entry = snapshot.outbox.iter().find(|entry| entry.id == 7);
    assert_eq!(
        entry.map(|entry| entry.priority),
        Some(SyncOutboxPriority::High)
    );
    assert_eq!(api.calls().await, vec!["priority", "stats", "summary"]);
}

#[tokio::test]
async fn failed_reprioritize_leaves_entry_and_skips_stats() {
    let api = Arc::new(FakeSyncApi::with_outbox(vec![outbox_entry(7, false)]));
    let service = build_service(api.clone());
    service.refresh_outbox().await;
    api.clear_calls().await;
    api.fail(&["priority"]).await;

    let result = service
        .reprioritize_outbox(7, SyncOutboxPriority::Low, "Reprogramar envio")
        .await;
    assert!(matches!(result, Err(AppError::Unavailable(_))));

    let snapshot = service.snapshot().await;
    assert_eq!(snapshot.outbox[0].priority, SyncOutboxPriority::Normal);
    assert!(snapshot.outbox_error.is_some());
    assert_eq!(api.calls().await, vec!["priority"]);
}

#[tokio::test]
async fn resolve_conflicts_without_conflicts_is_noop() {
    let api = Arc::new(FakeSyncApi::with_outbox(vec![outbox_entry(1, false)]));
    let service = build_service(api.clone());
    service.refresh_outbox().await;
    api.clear_calls().await;
    let prompt = FakeReasonPrompt::answering("Conciliacion mensual");

    let outcome = service.resolve_outbox_conflicts(&prompt).await;

    assert_eq!(
        outcome.unwrap_or(ConflictResolutionOutcome::Cancelled),
        ConflictResolutionOutcome::NoConflicts
    );
    assert_eq!(prompt.prompt_count().await, 0);
    assert!(api.calls().await.is_empty());
}

#[tokio::test]
async fn resolve_conflicts_replaces_outbox_with_server_list() {
    let api = Arc::new(FakeSyncApi::with_outbox(vec![
        outbox_entry(1, true),
        outbox_entry(2, false),
        outbox_entry(3, true),
    ]));
    let service = build_service(api.clone());
    service.refresh_outbox().await;
    api.clear_calls().await;
    let prompt = FakeReasonPrompt::answering("Conciliacion mensual");

    let outcome = service.resolve_outbox_conflicts(&prompt).await;
    assert!(outcome.is_ok());
    match outcome.unwrap_or(ConflictResolutionOutcome::Cancelled) {
        ConflictResolutionOutcome::Resolved { resolved, message } => {
            assert_eq!(resolved, 2);
            assert_eq!(message, "2 outbox conflicts marked as resolved.");
        }
        other => panic!("unexpected outcome: {other:?}"),
    }

    assert!(service.conflict_entries().await.is_empty());
    assert_eq!(api.calls().await, vec!["resolve", "stats", "summary"]);
}

#[tokio::test]
async fn resolve_conflicts_rejects_short_reason_before_request() {
    let api = Arc::new(FakeSyncApi::with_outbox(vec![outbox_entry(1, true)]));
    let service = build_service(api.clone());
    service.refresh_outbox().await;
    api.clear_calls().await;
    let prompt = FakeReasonPrompt::answering("ok");

    let outcome = service.resolve_outbox_conflicts(&prompt).await;

    assert!(matches!(outcome, Err(AppError::Validation(_))));
    assert_eq!(prompt.prompt_count().await, 1);
    assert!(api.calls().await.is_empty());
}

#[tokio::test]
async fn cancelled_prompt_sends_nothing() {
    let api = Arc::new(FakeSyncApi::with_outbox(vec![outbox_entry(1, true)]));
    let service = build_service(api.clone());
    service.refresh_outbox().await;
    api.clear_calls().await;
    let prompt = FakeReasonPrompt::default();

    let outcome = service.resolve_outbox_conflicts(&prompt).await;

    assert_eq!(
        outcome.unwrap_or(ConflictResolutionOutcome::NoConflicts),
        ConflictResolutionOutcome::Cancelled
    );
    assert!(api.calls().await.is_empty());
}

#[tokio::test]
async fn retry_outbox_merges_entries_then_refreshes_stats() {
    let api = Arc::new(FakeSyncApi::with_outbox(vec![
        outbox_entry(1, false),
        outbox_entry(2, false),
    ]));
    let service = build_service(api.clone());
    service.refresh_outbox().await;
    api.clear_calls().await;

    let retried = service.retry_outbox("Reintento manual").await;
    assert_eq!(retried.unwrap_or_default(), 2);

    let snapshot = service.snapshot().await;
    assert!(snapshot.outbox.iter().all(|entry| entry.attempt_count == 2));
    assert_eq!(api.calls().await, vec!["retry", "stats", "summary"]);
}

#[tokio::test]
async fn retry_on_empty_outbox_is_noop() {
    let api = Arc::new(FakeSyncApi::default());
    let service = build_service(api.clone());

    let retried = service.retry_outbox("").await;

    assert_eq!(retried.unwrap_or(usize::MAX), 0);
    assert!(api.calls().await.is_empty());
}

#[tokio::test]
async fn disposed_session_discards_results() {
    let api = Arc::new(FakeSyncApi::with_outbox(vec![outbox_entry(1, false)]));
    let session = DashboardSession::new();
    let service = SyncService::new(api, session.clone());
    session.dispose();

    assert_eq!(service.refresh_outbox().await, SyncRefreshSource::Discarded);
    assert!(service.snapshot().await.outbox.is_empty());
}

#[tokio::test]
async fn observability_failure_keeps_previous_snapshot() {
    let api = Arc::new(FakeSyncApi::default());
    let service = build_service(api.clone());
    assert!(service.refresh_observability().await.is_ok());

    api.fail(&["observability"]).await;
    assert!(service.refresh_observability().await.is_err());

    let snapshot = service.snapshot().await;
    assert!(snapshot.observability.is_some());
    assert!(snapshot.observability_error.is_some());
}
