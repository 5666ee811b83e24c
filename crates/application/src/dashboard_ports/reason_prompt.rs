use async_trait::async_trait;

/// Port asking the operator for a corporate reason.
#[async_trait]
pub trait ReasonPrompt: Send + Sync {
    /// Returns the typed reason, or `None` when the operator cancels.
    async fn request_reason(&self, message: &str) -> Option<String>;
}
