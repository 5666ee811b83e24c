use std::sync::Arc;

use async_trait::async_trait;
use softmobile_application::ReasonPrompt;
use tokio::sync::{Mutex, mpsc};
use tracing::info;

/// Reason prompt answered by the next line of operator input.
///
/// The line channel is shared with the command reader, so a prompt consumes
/// the line typed right after the question is printed.
#[derive(Clone)]
pub struct LineReasonPrompt {
    lines: Arc<Mutex<mpsc::Receiver<String>>>,
}

impl LineReasonPrompt {
    /// Creates a prompt reading from a shared line channel.
    #[must_use]
    pub fn new(lines: Arc<Mutex<mpsc::Receiver<String>>>) -> Self {
        Self { lines }
    }
}

#[async_trait]
impl ReasonPrompt for LineReasonPrompt {
    async fn request_reason(&self, message: &str) -> Option<String> {
        info!(prompt = %message, "corporate reason requested");
        println!("{message}");

        let line = self.lines.lock().await.recv().await?;
        let line = line.trim();
        if line.is_empty() {
            None
        } else {
            Some(line.to_owned())
        }
    }
}
