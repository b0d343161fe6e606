//! Countdown timer for speed-bounded sessions.
//!
//! Runs on its own tokio task so answer handling never delays a tick, and
//! broadcasts the remaining seconds over a watch channel for select loops.
//! Tests drive it deterministically on tokio's paused clock.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Default wall-clock bound for speed mode.
pub const DEFAULT_SPEED_DURATION: Duration = Duration::from_secs(240);

/// A cancellable one-second-cadence countdown.
///
/// Counts down from the configured duration, stops at zero (no negative
/// counts, no further ticks), and aborts its task on cancel or drop so no
/// stray expiry fires after a reset or mode switch.
#[derive(Debug)]
pub struct SessionTimer {
    remaining: watch::Receiver<u64>,
    task: JoinHandle<()>,
}

impl SessionTimer {
    /// Start counting down from `duration`, rounded down to whole seconds.
    pub fn start(duration: Duration) -> Self {
        let total = duration.as_secs();
        let (tx, remaining) = watch::channel(total);

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            // the first tick completes immediately
            interval.tick().await;

            let mut left = total;
            while left > 0 {
                interval.tick().await;
                left -= 1;
                if tx.send(left).is_err() {
                    return;
                }
            }
        });

        Self { remaining, task }
    }

    /// Seconds left on the countdown.
    pub fn remaining(&self) -> u64 {
        *self.remaining.borrow()
    }

    pub fn is_expired(&self) -> bool {
        self.remaining() == 0
    }

    /// A receiver of the remaining seconds, for driving a select loop.
    /// The value reaching zero is the forced-termination signal.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.remaining.clone()
    }

    /// Resolves once the countdown reaches zero. Pends forever if the timer
    /// was cancelled first.
    pub async fn expired(&self) {
        let mut rx = self.remaining.clone();
        while *rx.borrow() > 0 {
            if rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }

    /// Stop the countdown immediately. No further ticks fire.
    pub fn cancel(&self) {
        self.task.abort();
    }
}

impl Drop for SessionTimer {
    fn drop(&mut self) {
        self.task.abort();
    }
}
