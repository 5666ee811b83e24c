use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{AppError, AppResult};

/// Minimum number of characters a corporate reason must carry.
pub const CORPORATE_REASON_MIN_LENGTH: usize = 5;

/// Free-text justification attached to sensitive writes for audit purposes.
///
/// The value is trimmed on construction and must keep at least
/// [`CORPORATE_REASON_MIN_LENGTH`] characters afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CorporateReason(String);

impl CorporateReason {
    /// Creates a validated corporate reason.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.chars().count() < CORPORATE_REASON_MIN_LENGTH {
            return Err(AppError::Validation(format!(
                "corporate reason must have at least {CORPORATE_REASON_MIN_LENGTH} characters"
            )));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the trimmed reason text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for CorporateReason {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CorporateReason> for String {
    fn from(value: CorporateReason) -> Self {
        value.0
    }
}

impl Display for CorporateReason {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}
