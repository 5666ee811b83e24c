use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared dispose flag for one dashboard session.
///
/// Services check it after every awaited call and drop late results once the
/// session is disposed.
#[derive(Debug, Clone, Default)]
pub struct DashboardSession {
    disposed: Arc<AtomicBool>,
}

impl DashboardSession {
    /// Creates an active session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the session as disposed.
    pub fn dispose(&self) {
        self.disposed.store(true, Ordering::Release);
    }

    /// Returns true once the session has been disposed.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }
}
