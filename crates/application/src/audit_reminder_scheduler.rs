use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info};

/// Default cadence of repeated reminders.
pub const DEFAULT_REMINDER_INTERVAL: Duration = Duration::from_secs(120);

/// Default suppression window requested by a snooze.
pub const DEFAULT_REMINDER_SNOOZE: Duration = Duration::from_secs(600);

/// Timing configuration of the reminder scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuditReminderSchedule {
    /// Cadence of repeated reminders.
    pub interval: Duration,
    /// Suppression window requested by a snooze.
    pub snooze: Duration,
}

impl Default for AuditReminderSchedule {
    fn default() -> Self {
        Self {
            interval: DEFAULT_REMINDER_INTERVAL,
            snooze: DEFAULT_REMINDER_SNOOZE,
        }
    }
}

/// Reminder scheduler states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditReminderState {
    /// No pending alerts and no timer armed.
    Idle,
    /// Pending alerts are re-announced every interval.
    Reminding {
        /// Instant the next reminder is due.
        next_due: Instant,
    },
    /// Reminders are suppressed until the deadline.
    Snoozed {
        /// Instant the snooze expires.
        until: Instant,
    },
}

/// Reminder emitted by the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuditReminderNotice {
    /// Alerts still waiting for an operator.
    pub pending_count: u32,
    /// Grouping window reported by the backend.
    pub threshold_minutes: u32,
}

impl AuditReminderNotice {
    /// Returns the toast text for this reminder.
    #[must_use]
    pub fn message(&self) -> String {
        let noun = if self.pending_count == 1 {
            "critical alert"
        } else {
            "critical alerts"
        };
        format!(
            "{} {noun} pending acknowledgement (threshold {} min).",
            self.pending_count, self.threshold_minutes
        )
    }
}

/// Session-scoped scheduler re-announcing unacknowledged persistent alerts.
///
/// The scheduler owns no timer. Callers feed it the current instant and sleep
/// until [`AuditReminderScheduler::next_deadline`].
#[derive(Debug, Clone)]
pub struct AuditReminderScheduler {
    schedule: AuditReminderSchedule,
    state: AuditReminderState,
    pending_count: u32,
    threshold_minutes: u32,
    last_toast_at: Option<Instant>,
}

impl AuditReminderScheduler {
    /// Creates an idle scheduler.
    #[must_use]
    pub fn new(schedule: AuditReminderSchedule) -> Self {
        Self {
            schedule,
            state: AuditReminderState::Idle,
            pending_count: 0,
            threshold_minutes: 0,
            last_toast_at: None,
        }
    }

    /// Seeds the instant of the last reminder shown before this scheduler existed.
    #[must_use]
    pub fn with_last_toast_at(mut self, last_toast_at: Option<Instant>) -> Self {
        self.last_toast_at = last_toast_at;
        self
    }

    /// Returns the timing configuration.
    #[must_use]
    pub fn schedule(&self) -> AuditReminderSchedule {
        self.schedule
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> AuditReminderState {
        self.state
    }

    /// Returns the last known pending alert count.
    #[must_use]
    pub fn pending_count(&self) -> u32 {
        self.pending_count
    }

    /// Returns the instant of the last reminder.
    #[must_use]
    pub fn last_toast_at(&self) -> Option<Instant> {
        self.last_toast_at
    }

    /// Returns the only armed deadline, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        match self.state {
            AuditReminderState::Idle => None,
            AuditReminderState::Reminding { next_due } => Some(next_due),
            AuditReminderState::Snoozed { until } => Some(until),
        }
    }

    /// Feeds a freshly fetched pending count.
    pub fn update_pending(
        &mut self,
        pending_count: u32,
        threshold_minutes: u32,
        now: Instant,
    ) -> Option<AuditReminderNotice> {
        self.pending_count = pending_count;
        self.threshold_minutes = threshold_minutes;

        if pending_count == 0 {
            self.reset();
            return None;
        }

        match self.state {
            AuditReminderState::Idle => self.enter_reminding(now),
            AuditReminderState::Reminding { .. } | AuditReminderState::Snoozed { .. } => None,
        }
    }

    /// Suppresses reminders for the snooze window.
    ///
    /// Returns false when there is nothing to snooze.
    pub fn snooze(&mut self, now: Instant) -> bool {
        if self.state == AuditReminderState::Idle {
            return false;
        }

        let until = now + self.schedule.snooze;
        info!(
            pending_count = self.pending_count,
            snooze_seconds = self.schedule.snooze.as_secs(),
            "audit reminders snoozed"
        );
        self.state = AuditReminderState::Snoozed { until };
        true
    }

    /// Advances the scheduler to `now` and returns a reminder when one is due.
    pub fn poll(&mut self, now: Instant) -> Option<AuditReminderNotice> {
        match self.state {
            AuditReminderState::Idle => None,
            AuditReminderState::Reminding { next_due } if now >= next_due => {
                Some(self.fire(now))
            }
            AuditReminderState::Reminding { .. } => None,
            AuditReminderState::Snoozed { until } if now >= until => {
                debug!(
                    pending_count = self.pending_count,
                    "audit reminder snooze expired"
                );
                if self.pending_count == 0 {
                    self.reset();
                    None
                } else {
                    self.enter_reminding(now)
                }
            }
            AuditReminderState::Snoozed { .. } => None,
        }
    }

    fn enter_reminding(&mut self, now: Instant) -> Option<AuditReminderNotice> {
        let half_interval = self.schedule.interval / 2;
        match self.last_toast_at {
            Some(last) if now.saturating_duration_since(last) <= half_interval => {
                self.state = AuditReminderState::Reminding {
                    next_due: last + self.schedule.interval,
                };
                None
            }
            _ => Some(self.fire(now)),
        }
    }

    fn fire(&mut self, now: Instant) -> AuditReminderNotice {
        self.last_toast_at = Some(now);
        self.state = AuditReminderState::Reminding {
            next_due: now + self.schedule.interval,
        };
        AuditReminderNotice {
            pending_count: self.pending_count,
            threshold_minutes: self.threshold_minutes,
        }
    }

    fn reset(&mut self) {
        if self.state != AuditReminderState::Idle {
            debug!("audit reminder scheduler idle");
        }
        self.state = AuditReminderState::Idle;
        self.last_toast_at = None;
    }
}

impl Default for AuditReminderScheduler {
    fn default() -> Self {
        Self::new(AuditReminderSchedule::default())
    }
}
