use std::time::Duration;

use tokio::time::Instant;

/// Default cadence of the periodic dashboard refresh.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// Visibility of the page hosting the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageVisibility {
    /// Page is on screen.
    Visible,
    /// Page is in the background.
    Hidden,
}

/// Visibility-aware periodic refresh decisions.
#[derive(Debug, Clone)]
pub struct RefreshPolicy {
    interval: Duration,
    visibility: PageVisibility,
    last_refresh_at: Option<Instant>,
}

impl RefreshPolicy {
    /// Creates a policy for a visible page.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            visibility: PageVisibility::Visible,
            last_refresh_at: None,
        }
    }

    /// Returns the refresh cadence.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns the current page visibility.
    #[must_use]
    pub fn visibility(&self) -> PageVisibility {
        self.visibility
    }

    /// Returns the last refresh instant.
    #[must_use]
    pub fn last_refresh_at(&self) -> Option<Instant> {
        self.last_refresh_at
    }

    /// Decides whether a periodic tick triggers a refresh.
    ///
    /// Ticks are skipped while the page is hidden.
    pub fn on_tick(&mut self, now: Instant) -> bool {
        if self.visibility == PageVisibility::Hidden {
            return false;
        }

        self.last_refresh_at = Some(now);
        true
    }

    /// Records a visibility change and decides whether to refresh right away.
    ///
    /// Only a hidden to visible transition triggers a refresh.
    pub fn on_visibility_change(&mut self, visibility: PageVisibility, now: Instant) -> bool {
        let previous = self.visibility;
        self.visibility = visibility;

        if previous == PageVisibility::Hidden && visibility == PageVisibility::Visible {
            self.last_refresh_at = Some(now);
            return true;
        }

        false
    }
}

impl Default for RefreshPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_REFRESH_INTERVAL)
    }
}
