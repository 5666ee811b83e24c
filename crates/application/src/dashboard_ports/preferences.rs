use async_trait::async_trait;
use softmobile_core::AppResult;

/// Preference key for the collapsed sidebar flag.
pub const SIDEBAR_COLLAPSED_KEY: &str = "softmobile_sidebar_collapsed";

/// Preference key for the last visited module.
pub const LAST_MODULE_KEY: &str = "softmobile_last_module";

/// Key-value store for operator UI preferences.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Returns the stored value for one key.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Stores one value.
    async fn set(&self, key: &str, value: &str) -> AppResult<()>;
}
