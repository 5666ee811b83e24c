use std::env;
use std::path::PathBuf;
use std::time::Duration;

use softmobile_application::DashboardSettings;
use softmobile_core::{AppError, AppResult};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub api_base_url: String,
    pub api_token: String,
    pub refresh_interval: Duration,
    pub reminder_interval: Duration,
    pub reminder_snooze: Duration,
    pub toast_ttl: Duration,
    pub http_timeout: Duration,
    pub preferences_path: PathBuf,
    pub store_id: Option<i64>,
}

impl AgentConfig {
    pub fn load() -> AppResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup("SOFTMOBILE_API_BASE_URL")
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| "http://127.0.0.1:8000".to_owned())
            .trim_end_matches('/')
            .to_owned();
        let api_token = lookup("SOFTMOBILE_API_TOKEN")
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| AppError::Validation("SOFTMOBILE_API_TOKEN is required".to_owned()))?;

        let refresh_interval = Duration::from_millis(positive_u64(
            &lookup,
            "SOFTMOBILE_REFRESH_INTERVAL_MS",
            30_000,
        )?);
        let reminder_interval = Duration::from_secs(positive_u64(
            &lookup,
            "SOFTMOBILE_REMINDER_INTERVAL_SECONDS",
            120,
        )?);
        let reminder_snooze = Duration::from_secs(positive_u64(
            &lookup,
            "SOFTMOBILE_REMINDER_SNOOZE_SECONDS",
            600,
        )?);
        let toast_ttl =
            Duration::from_millis(positive_u64(&lookup, "SOFTMOBILE_TOAST_TTL_MS", 4_500)?);
        let http_timeout = Duration::from_secs(positive_u64(
            &lookup,
            "SOFTMOBILE_HTTP_TIMEOUT_SECONDS",
            15,
        )?);

        let preferences_path = lookup("SOFTMOBILE_PREFERENCES_PATH")
            .filter(|value| !value.trim().is_empty())
            .map_or_else(
                || PathBuf::from("softmobile-preferences.json"),
                PathBuf::from,
            );

        let store_id = lookup("SOFTMOBILE_STORE_ID")
            .filter(|value| !value.trim().is_empty())
            .map(|value| {
                value.trim().parse::<i64>().map_err(|error| {
                    AppError::Validation(format!("invalid SOFTMOBILE_STORE_ID '{value}': {error}"))
                })
            })
            .transpose()?;

        Ok(Self {
            api_base_url,
            api_token,
            refresh_interval,
            reminder_interval,
            reminder_snooze,
            toast_ttl,
            http_timeout,
            preferences_path,
            store_id,
        })
    }

    pub fn dashboard_settings(&self) -> DashboardSettings {
        let mut settings = DashboardSettings::default();
        settings.reminder_schedule.interval = self.reminder_interval;
        settings.reminder_schedule.snooze = self.reminder_snooze;
        settings.toast_ttl = self.toast_ttl;
        settings
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn positive_u64<F>(lookup: &F, name: &str, default: u64) -> AppResult<u64>
where
    F: Fn(&str) -> Option<String>,
{
    let value = match lookup(name) {
        Some(value) => value.trim().parse::<u64>().map_err(|error| {
            AppError::Validation(format!("invalid {name} value '{value}': {error}"))
        })?,
        None => default,
    };

    if value == 0 {
        return Err(AppError::Validation(format!(
            "{name} must be greater than zero"
        )));
    }

    Ok(value)
}
