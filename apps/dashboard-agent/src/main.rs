//! Softmobile dashboard agent runtime.

#![forbid(unsafe_code)]

mod agent_command;
mod agent_config;

use std::sync::Arc;

use softmobile_application::{
    AcknowledgeReminderInput, DashboardPorts, DashboardService, PageVisibility, RefreshPolicy,
};
use softmobile_core::{AppError, AppResult};
use softmobile_infrastructure::{HttpSoftmobileClient, JsonFilePreferenceStore, LineReasonPrompt};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{Mutex, mpsc};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{info, warn};

use crate::agent_command::{AgentCommand, HELP};
use crate::agent_config::{AgentConfig, init_tracing};

type SharedLines = Arc<Mutex<mpsc::Receiver<String>>>;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AgentConfig::load()?;
    let http_client = reqwest::Client::builder()
        .timeout(config.http_timeout)
        .build()
        .map_err(|error| AppError::Internal(format!("failed to build HTTP client: {error}")))?;
    let backend = Arc::new(HttpSoftmobileClient::new(
        http_client,
        config.api_base_url.as_str(),
        config.api_token.clone(),
    )?);

    let preference_store = Arc::new(JsonFilePreferenceStore::new(
        config.preferences_path.clone(),
    ));

    info!(
        api_base_url = %backend.base_url(),
        refresh_interval_ms = config.refresh_interval.as_millis(),
        reminder_interval_seconds = config.reminder_interval.as_secs(),
        reminder_snooze_seconds = config.reminder_snooze.as_secs(),
        preferences_path = %preference_store.path().display(),
        "softmobile-dashboard-agent started"
    );

    let dashboard = DashboardService::new(
        DashboardPorts {
            sync_api: backend.clone(),
            audit_api: backend.clone(),
            inventory_api: backend,
            preference_store,
        },
        config.dashboard_settings(),
    );

    restore_preferences(&dashboard).await;
    dashboard.initial_load(Instant::now()).await;
    if let Some(store_id) = config.store_id {
        if let Err(error) = dashboard.select_store(Some(store_id)).await {
            warn!(store_id, error = %error, "configured store could not be selected");
        }
    }

    let lines = spawn_line_reader();
    let prompt = LineReasonPrompt::new(lines.clone());
    run(&dashboard, &config, &lines, &prompt).await;

    dashboard.dispose();
    info!("softmobile-dashboard-agent stopped");
    Ok(())
}

async fn run(
    dashboard: &DashboardService,
    config: &AgentConfig,
    lines: &SharedLines,
    prompt: &LineReasonPrompt,
) {
    let mut policy = RefreshPolicy::new(config.refresh_interval);
    let mut ticker = tokio::time::interval_at(
        Instant::now() + config.refresh_interval,
        config.refresh_interval,
    );
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        let reminder_deadline = dashboard.audit().next_reminder_deadline().await;
        let toast_deadline = dashboard.next_toast_expiry().await;

        tokio::select! {
            _ = &mut shutdown => {
                info!("shutdown signal received");
                break;
            }
            _ = ticker.tick() => {
                let now = Instant::now();
                if policy.on_tick(now) {
                    dashboard.refresh(now).await;
                }
            }
            () = sleep_until(reminder_deadline) => {
                dashboard.poll_reminders(Instant::now()).await;
            }
            () = sleep_until(toast_deadline) => {
                for toast in dashboard.expire_toasts(Instant::now()).await {
                    info!(toast_id = toast.id, "toast expired");
                }
            }
            line = next_line(lines) => {
                let Some(line) = line else {
                    info!("operator input closed");
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<AgentCommand>() {
                    Ok(AgentCommand::Quit) => break,
                    Ok(command) => {
                        if let Err(error) = execute(dashboard, &mut policy, prompt, command).await {
                            warn!(error = %error, "command failed");
                        }
                    }
                    Err(error) => {
                        println!("{error}");
                        println!("{HELP}");
                    }
                }
            }
        }
    }
}

async fn execute(
    dashboard: &DashboardService,
    policy: &mut RefreshPolicy,
    prompt: &LineReasonPrompt,
    command: AgentCommand,
) -> AppResult<()> {
    match command {
        AgentCommand::Refresh => dashboard.refresh(Instant::now()).await,
        AgentCommand::Status => print_status(dashboard).await,
        AgentCommand::SelectStore(store_id) => dashboard.select_store(store_id).await?,
        AgentCommand::Search(term) => dashboard.set_search_term(term).await,
        AgentCommand::Retry { reason } => {
            dashboard.retry_outbox(reason.as_str()).await?;
        }
        AgentCommand::Reprioritize {
            entry_id,
            priority,
            reason,
        } => {
            dashboard
                .reprioritize_outbox(entry_id, priority, reason.as_str())
                .await?;
        }
        AgentCommand::ResolveConflicts => {
            dashboard.resolve_outbox_conflicts(prompt).await?;
        }
        AgentCommand::Acknowledge {
            entity_type,
            entity_id,
            reason,
            note,
        } => {
            dashboard
                .acknowledge_reminder(
                    AcknowledgeReminderInput {
                        entity_type,
                        entity_id,
                        reason,
                        note,
                    },
                    Instant::now(),
                )
                .await?;
        }
        AgentCommand::Snooze => dashboard.snooze_reminders(Instant::now()).await?,
        AgentCommand::Visibility(visibility) => {
            let now = Instant::now();
            if policy.on_visibility_change(visibility, now) {
                info!(
                    interval_ms = policy.interval().as_millis(),
                    "periodic refresh resumed"
                );
                dashboard.refresh(now).await;
            }
            if policy.visibility() == PageVisibility::Hidden {
                info!("periodic refresh paused");
            }
        }
        AgentCommand::Sidebar(collapsed) => dashboard.set_sidebar_collapsed(collapsed).await?,
        AgentCommand::Module(module) => dashboard.set_last_module(module.as_str()).await?,
        AgentCommand::DismissToast(id) => {
            if !dashboard.dismiss_toast(id).await {
                return Err(AppError::NotFound(format!("toast {id}")));
            }
        }
        AgentCommand::Help => println!("{HELP}"),
        AgentCommand::Quit => {}
    }

    Ok(())
}

async fn restore_preferences(dashboard: &DashboardService) {
    match dashboard.sidebar_collapsed().await {
        Ok(collapsed) => info!(collapsed, "sidebar preference restored"),
        Err(error) => warn!(error = %error, "sidebar preference unavailable"),
    }
    match dashboard.last_module().await {
        Ok(Some(module)) => info!(module = %module, "last module restored"),
        Ok(None) => {}
        Err(error) => warn!(error = %error, "last module preference unavailable"),
    }
}

async fn print_status(dashboard: &DashboardService) {
    let snapshot = dashboard.snapshot().await;
    let sync = dashboard.sync().snapshot().await;
    let audit = dashboard.audit().snapshot().await;

    let health = snapshot
        .health
        .as_ref()
        .map_or("unknown", |health| health.status.as_str());
    println!("backend: {health}");
    if let Some(metrics) = &snapshot.metrics {
        println!(
            "inventory: {} stores, {} devices, {}",
            metrics.totals.stores,
            metrics.totals.devices,
            dashboard.format_currency(metrics.totals.total_value)
        );
    }
    if let Some(store) = snapshot.selected_store() {
        println!(
            "store: {} ({} matching devices)",
            store.name,
            snapshot.filtered_devices().len()
        );
    }
    if let Some(error) = &snapshot.inventory_error {
        println!("inventory error: {error}");
    }

    println!(
        "outbox: {} entries, {} conflicts",
        sync.outbox.len(),
        sync.conflict_entries().len()
    );
    if let Some(progress) = &sync.hybrid_progress {
        println!(
            "hybrid sync: {:.1}% ({} pending)",
            progress.percent, progress.pending
        );
    }
    if let Some(error) = &sync.outbox_error {
        println!("sync error: {error}");
    }
    if let Some(observability) = &sync.observability {
        println!(
            "observability: {} critical notifications",
            observability.critical_notifications().count()
        );
    }

    println!(
        "audit: {} pending alerts, reminders {:?}",
        audit.pending_alerts_count(),
        dashboard.audit().reminder_state().await
    );
    for toast in dashboard.toasts().await {
        println!("[{}] #{} {}", toast.variant.as_str(), toast.id, toast.message);
    }
}

fn spawn_line_reader() -> SharedLines {
    let (sender, receiver) = mpsc::channel(16);
    tokio::spawn(async move {
        let mut stdin = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match stdin.next_line().await {
                Ok(Some(line)) => {
                    if sender.send(line).await.is_err() {
                        break;
                    }
                }
                Ok(None) => break,
                Err(error) => {
                    warn!(error = %error, "failed to read operator input");
                    break;
                }
            }
        }
    });
    Arc::new(Mutex::new(receiver))
}

async fn next_line(lines: &SharedLines) -> Option<String> {
    lines.lock().await.recv().await
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
