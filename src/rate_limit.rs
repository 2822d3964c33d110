use std::time::{Duration, Instant};

use dashmap::DashMap;

use crate::config::LoginLimit;

/// Map size past which `record_failure` sweeps expired windows.
const CLEANUP_THRESHOLD: usize = 1024;

/// Failed-login counter per normalized email, over a fixed window.
pub struct LoginRateLimiter {
    max_failures: u32,
    window: Duration,
    /// email -> (failures, window_start)
    entries: DashMap<String, (u32, Instant)>,
}

impl LoginRateLimiter {
    pub fn new(limit: &LoginLimit) -> Self {
        Self {
            max_failures: limit.max_failures,
            window: Duration::from_secs(limit.window_secs),
            entries: DashMap::new(),
        }
    }

    /// Err carries the seconds until the window resets.
    /// Only `record_failure` moves the counter.
    pub fn check(&self, email: &str) -> Result<(), u64> {
        let Some(entry) = self.entries.get(email) else {
            return Ok(());
        };
        let (failures, start) = *entry.value();
        let elapsed = start.elapsed();

        if elapsed > self.window || failures < self.max_failures {
            return Ok(());
        }
        Err(self.window.saturating_sub(elapsed).as_secs().max(1))
    }

    pub fn record_failure(&self, email: &str) {
        if self.entries.len() >= CLEANUP_THRESHOLD {
            self.cleanup();
        }

        let now = Instant::now();
        let mut entry = self.entries.entry(email.to_string()).or_insert((0, now));
        let (failures, start) = entry.value_mut();

        if now.duration_since(*start) > self.window {
            *failures = 1;
            *start = now;
        } else {
            *failures += 1;
        }
    }

    pub fn clear(&self, email: &str) {
        self.entries.remove(email);
    }

    /// Drop every entry whose window has run out.
    pub fn cleanup(&self) {
        let now = Instant::now();
        self.entries
            .retain(|_, (_, start)| now.duration_since(*start) <= self.window);
    }

    /// Number of emails currently tracked.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
