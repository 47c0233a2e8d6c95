// src/services/throttle.rs
//
// Fetch pacing for multi-account aggregation.
//
// CRITICAL RULES:
// - One fetch in flight at a time
// - Accounts are drained in the order given
// - The first fetch never waits

use std::collections::VecDeque;
use std::time::Duration;

/// Decides how long to wait between two consecutive fetches.
pub trait ThrottlePolicy: Send + Sync {
    /// Interval to enforce before the next fetch, given how many fetches in a
    /// row have failed just before it.
    fn interval(&self, consecutive_failures: u32) -> Duration;
}

/// Constant pause between fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDelay {
    pub delay: Duration,
}

impl FixedDelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for FixedDelay {
    fn default() -> Self {
        Self::new(Duration::from_millis(200))
    }
}

impl ThrottlePolicy for FixedDelay {
    fn interval(&self, _consecutive_failures: u32) -> Duration {
        self.delay
    }
}

/// Doubles the pause after each consecutive failure, up to `max`.
/// A success resets it to `base`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdaptiveBackoff {
    pub base: Duration,
    pub max: Duration,
}

impl AdaptiveBackoff {
    pub fn new(base: Duration, max: Duration) -> Self {
        Self { base, max }
    }
}

impl ThrottlePolicy for AdaptiveBackoff {
    fn interval(&self, consecutive_failures: u32) -> Duration {
        let factor = 1u32.checked_shl(consecutive_failures).unwrap_or(u32::MAX);
        self.base.saturating_mul(factor).min(self.max)
    }
}

/// Queue of pending account fetches, drained one at a time.
pub struct FetchQueue<'a> {
    pending: VecDeque<String>,
    policy: &'a dyn ThrottlePolicy,
    started: bool,
    consecutive_failures: u32,
}

impl<'a> FetchQueue<'a> {
    pub fn new(identifiers: &[String], policy: &'a dyn ThrottlePolicy) -> Self {
        Self {
            pending: identifiers.iter().cloned().collect(),
            policy,
            started: false,
            consecutive_failures: 0,
        }
    }

    /// Waits out the enforced interval, then hands out the next account.
    pub async fn next(&mut self) -> Option<String> {
        let identifier = self.pending.pop_front()?;

        if self.started {
            let wait = self.policy.interval(self.consecutive_failures);
            if !wait.is_zero() {
                log::debug!("Waiting {:?} before fetching '{}'", wait, identifier);
                tokio::time::sleep(wait).await;
            }
        }
        self.started = true;

        Some(identifier)
    }

    /// Reports how the fetch handed out by the last `next` call went.
    pub fn record(&mut self, succeeded: bool) {
        if succeeded {
            self.consecutive_failures = 0;
        } else {
            self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        }
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}
