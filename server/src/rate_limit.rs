//! In-memory rate limiting for access-code requests.
//!
//! DESIGN
//! ======
//! Sliding-window counters backed by `HashMap<String, VecDeque<Instant>>`,
//! keyed by normalized email. Two limits are enforced:
//! - Per-email: `CODE_REQUEST_LIMIT` requests per `CODE_REQUEST_WINDOW_SECS`
//! - Global: ten times the per-email limit over the same window
//!
//! TRADE-OFFS
//! ==========
//! Counters live in process memory, so a restart resets them and multiple
//! replicas each enforce their own window. Acceptable for a login throttle.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

const GLOBAL_MULTIPLIER: usize = 10;

#[derive(Clone, Copy, Debug)]
struct RateLimitConfig {
    per_email_limit: usize,
    global_limit: usize,
    window: Duration,
}

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RateLimitError {
    #[error("too many code requests for this email (max {limit}/{window_secs}s)")]
    PerEmailExceeded { limit: usize, window_secs: u64 },
    #[error("too many code requests (max {limit}/{window_secs}s)")]
    GlobalExceeded { limit: usize, window_secs: u64 },
}

// =============================================================================
// RATE LIMITER
// =============================================================================

#[derive(Clone)]
pub struct CodeRequestLimiter {
    inner: Arc<Mutex<LimiterInner>>,
    config: RateLimitConfig,
}

#[derive(Default)]
struct LimiterInner {
    /// Per-email request timestamps.
    email_requests: HashMap<String, VecDeque<Instant>>,
    /// Global request timestamps.
    global_requests: VecDeque<Instant>,
}

impl CodeRequestLimiter {
    #[must_use]
    pub fn new(per_email_limit: usize, window: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(LimiterInner::default())),
            config: RateLimitConfig {
                per_email_limit,
                global_limit: per_email_limit.saturating_mul(GLOBAL_MULTIPLIER),
                window,
            },
        }
    }

    /// Check per-email and global limits, then record the request.
    ///
    /// # Errors
    ///
    /// Returns which limit was exceeded; nothing is recorded in that case.
    pub fn check_and_record(&self, email: &str) -> Result<(), RateLimitError> {
        self.check_and_record_at(email, Instant::now())
    }

    fn check_and_record_at(&self, email: &str, now: Instant) -> Result<(), RateLimitError> {
        let mut inner = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let cfg = self.config;

        prune_window(&mut inner.global_requests, now, cfg.window);
        if inner.global_requests.len() >= cfg.global_limit {
            return Err(RateLimitError::GlobalExceeded { limit: cfg.global_limit, window_secs: cfg.window.as_secs() });
        }

        let email_deque = inner.email_requests.entry(email.to_owned()).or_default();
        prune_window(email_deque, now, cfg.window);
        if email_deque.len() >= cfg.per_email_limit {
            return Err(RateLimitError::PerEmailExceeded {
                limit: cfg.per_email_limit,
                window_secs: cfg.window.as_secs(),
            });
        }

        email_deque.push_back(now);
        inner.global_requests.push_back(now);
        Ok(())
    }

    /// Drop per-email entries whose window has fully elapsed.
    pub fn sweep(&self) {
        self.sweep_at(Instant::now());
    }

    fn sweep_at(&self, now: Instant) {
        let mut inner = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let window = self.config.window;
        inner.email_requests.retain(|_, deque| {
            prune_window(deque, now, window);
            !deque.is_empty()
        });
    }

    #[cfg(test)]
    fn tracked_emails(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .email_requests
            .len()
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn prune_window(deque: &mut VecDeque<Instant>, now: Instant, window: Duration) {
    while let Some(&front) = deque.front() {
        if now.duration_since(front) > window {
            deque.pop_front();
        } else {
            break;
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[path = "rate_limit_test.rs"]
mod tests;
