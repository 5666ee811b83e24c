//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod http_softmobile_client;
mod json_file_preference_store;
mod line_reason_prompt;

pub use http_softmobile_client::{HttpSoftmobileClient, REASON_HEADER};
pub use json_file_preference_store::JsonFilePreferenceStore;
pub use line_reason_prompt::LineReasonPrompt;
