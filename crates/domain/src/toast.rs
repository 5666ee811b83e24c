use serde::{Deserialize, Serialize};

/// Visual intent of a toast notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastVariant {
    /// Completed action.
    Success,
    /// Failed action.
    Error,
    /// Neutral information.
    Info,
    /// Attention required.
    Warning,
}

impl ToastVariant {
    /// Returns the stable transport value for this variant.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
            Self::Warning => "warning",
        }
    }
}

/// Ephemeral operator notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToastMessage {
    /// Queue-local identifier.
    pub id: u64,
    /// Text shown to the operator.
    pub message: String,
    /// Visual intent.
    pub variant: ToastVariant,
}
