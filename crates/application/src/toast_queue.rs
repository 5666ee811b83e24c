use std::collections::VecDeque;
use std::time::Duration;

use softmobile_domain::{ToastMessage, ToastVariant};
use tokio::time::Instant;

/// Lifetime of one toast before it expires.
pub const DEFAULT_TOAST_TTL: Duration = Duration::from_millis(4_500);

#[derive(Debug, Clone)]
struct QueuedToast {
    toast: ToastMessage,
    expires_at: Instant,
}

/// Ordered queue of ephemeral operator notifications.
#[derive(Debug, Clone)]
pub struct ToastQueue {
    ttl: Duration,
    next_id: u64,
    entries: VecDeque<QueuedToast>,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_TTL)
    }
}

impl ToastQueue {
    /// Creates an empty queue with the given toast lifetime.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            next_id: 1,
            entries: VecDeque::new(),
        }
    }

    /// Appends a toast and returns its identifier.
    pub fn push(&mut self, message: impl Into<String>, variant: ToastVariant, now: Instant) -> u64 {
        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        self.entries.push_back(QueuedToast {
            toast: ToastMessage {
                id,
                message: message.into(),
                variant,
            },
            expires_at: now + self.ttl,
        });
        id
    }

    /// Removes one toast before it expires.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.toast.id != id);
        self.entries.len() != before
    }

    /// Drops expired toasts and returns them.
    pub fn expire(&mut self, now: Instant) -> Vec<ToastMessage> {
        let mut expired = Vec::new();
        self.entries.retain(|entry| {
            if entry.expires_at <= now {
                expired.push(entry.toast.clone());
                false
            } else {
                true
            }
        });
        expired
    }

    /// Returns the visible toasts, oldest first.
    #[must_use]
    pub fn active(&self) -> Vec<ToastMessage> {
        self.entries.iter().map(|entry| entry.toast.clone()).collect()
    }

    /// Returns the instant the next toast expires.
    #[must_use]
    pub fn next_expiry(&self) -> Option<Instant> {
        self.entries.iter().map(|entry| entry.expires_at).min()
    }
}
