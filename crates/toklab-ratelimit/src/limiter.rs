//! Sliding-window request limiter
//!
//! Each client key owns the timestamps of its admitted requests within the
//! trailing window. A request is admitted while fewer than `max_requests`
//! timestamps remain after pruning; rejected requests are not recorded.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};

use tokio::time::Instant;
use tracing::{debug, warn};

use crate::config::RateLimitConfig;
use crate::error::RateLimitError;

type Windows = HashMap<String, VecDeque<Instant>>;

#[derive(Debug)]
pub struct RateLimiter {
    config: RateLimitConfig,
    windows: Mutex<Windows>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            windows: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Evaluate a request from `client` at the current time
    pub fn check(&self, client: &str) -> Result<(), RateLimitError> {
        self.check_at(client, Instant::now())
    }

    /// Evaluate a request from `client` at `now`
    pub fn check_at(&self, client: &str, now: Instant) -> Result<(), RateLimitError> {
        let mut windows = self.lock();
        let window = windows.entry(client.to_string()).or_default();
        self.prune(window, now);

        if window.len() >= self.config.max_requests as usize {
            warn!(
                "Rate limit exceeded for {} ({} requests in {:?})",
                client,
                window.len(),
                self.config.window
            );
            return Err(RateLimitError::TooManyRequests {
                client: client.to_string(),
            });
        }

        window.push_back(now);
        debug!(
            "Admitted request from {} ({}/{})",
            client,
            window.len(),
            self.config.max_requests
        );
        Ok(())
    }

    /// Requests from `client` still inside the window at `now`
    pub fn recent_requests(&self, client: &str, now: Instant) -> usize {
        let mut windows = self.lock();
        match windows.get_mut(client) {
            Some(window) => {
                self.prune(window, now);
                window.len()
            }
            None => 0,
        }
    }

    /// Forget clients with no request inside the window. Returns how many were dropped.
    pub fn purge_idle(&self) -> usize {
        let now = Instant::now();
        let mut windows = self.lock();
        let before = windows.len();
        windows.retain(|_, window| {
            self.prune(window, now);
            !window.is_empty()
        });
        before - windows.len()
    }

    pub fn tracked_clients(&self) -> usize {
        self.lock().len()
    }

    pub fn reset(&self) {
        self.lock().clear();
    }

    /// Drop timestamps that are a full window old or older.
    fn prune(&self, window: &mut VecDeque<Instant>, now: Instant) {
        while let Some(oldest) = window.front() {
            if now.saturating_duration_since(*oldest) >= self.config.window {
                window.pop_front();
            } else {
                break;
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, Windows> {
        // The map stays consistent even if a holder panicked mid-request.
        self.windows
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn limiter(max_requests: u32) -> RateLimiter {
        RateLimiter::new(RateLimitConfig::new(max_requests))
    }

    #[test]
    fn test_admits_up_to_threshold() {
        let limiter = limiter(5);
        let now = Instant::now();

        for _ in 0..5 {
            assert!(limiter.check_at("a", now).is_ok());
        }
        assert!(matches!(
            limiter.check_at("a", now),
            Err(RateLimitError::TooManyRequests { .. })
        ));
    }

    #[test]
    fn test_rejected_requests_are_not_recorded() {
        let limiter = limiter(2);
        let start = Instant::now();

        limiter.check_at("a", start).unwrap();
        limiter.check_at("a", start + Duration::from_secs(30)).unwrap();
        for _ in 0..10 {
            assert!(limiter.check_at("a", start + Duration::from_secs(40)).is_err());
        }

        // Only the first admission has left the window.
        assert_eq!(limiter.recent_requests("a", start + Duration::from_secs(60)), 1);
        assert!(limiter.check_at("a", start + Duration::from_secs(60)).is_ok());
    }

    #[test]
    fn test_entry_exactly_one_window_old_is_pruned() {
        let limiter = limiter(1);
        let start = Instant::now();

        limiter.check_at("a", start).unwrap();
        assert!(limiter
            .check_at("a", start + Duration::from_millis(59_999))
            .is_err());
        assert!(limiter.check_at("a", start + Duration::from_secs(60)).is_ok());
    }

    #[test]
    fn test_clients_are_isolated() {
        let limiter = limiter(1);
        let now = Instant::now();

        limiter.check_at("a", now).unwrap();
        assert!(limiter.check_at("a", now).is_err());
        assert!(limiter.check_at("b", now).is_ok());
        assert_eq!(limiter.tracked_clients(), 2);
    }

    #[test]
    fn test_zero_threshold_rejects_everything() {
        let limiter = limiter(0);
        assert!(limiter.check("a").is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_purge_idle_drops_expired_clients() {
        let limiter = limiter(5);
        limiter.check("a").unwrap();
        tokio::time::advance(Duration::from_secs(30)).await;
        limiter.check("b").unwrap();

        tokio::time::advance(Duration::from_secs(30)).await;
        assert_eq!(limiter.purge_idle(), 1);
        assert_eq!(limiter.tracked_clients(), 1);

        limiter.reset();
        assert_eq!(limiter.tracked_clients(), 0);
    }
}
