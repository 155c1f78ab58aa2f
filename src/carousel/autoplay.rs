//! Repeating autoplay timer
//!
//! The timer is a plain value owned by the controller. Dropping it is the
//! only way to cancel it, and nothing is spawned on the runtime, so it can
//! never outlive its owner.

use std::time::Duration;

use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

/// Default time between automatic slide changes
pub const DEFAULT_AUTOPLAY_PERIOD: Duration = Duration::from_secs(5);

#[derive(Debug)]
pub struct AutoplayTimer {
    interval: Interval,
    period: Duration,
}

impl AutoplayTimer {
    /// Start a timer whose first tick is one full `period` from now.
    /// `period` must be non-zero.
    pub fn start(period: Duration) -> Self {
        let mut interval = interval_at(Instant::now() + period, period);
        // A stalled event loop should not replay a burst of missed slides
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tracing::debug!(period_ms = period.as_millis() as u64, "autoplay timer started");
        Self { interval, period }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Wait for the next tick. Cancel safe.
    pub async fn tick(&mut self) {
        self.interval.tick().await;
    }
}

impl Drop for AutoplayTimer {
    fn drop(&mut self) {
        tracing::debug!("autoplay timer cancelled");
    }
}
