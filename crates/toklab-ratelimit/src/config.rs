//! Rate limiter configuration types

use std::time::Duration;

use crate::identity::ClientIdentity;

/// Default number of admitted requests per window
pub const DEFAULT_MAX_REQUESTS: u32 = 5;
/// Default window length
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Requests admitted per client within one window
    pub max_requests: u32,

    /// Length of the trailing window
    pub window: Duration,

    /// How the client key is derived from a request
    pub identity: ClientIdentity,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: DEFAULT_MAX_REQUESTS,
            window: DEFAULT_WINDOW,
            identity: ClientIdentity::default(),
        }
    }
}

impl RateLimitConfig {
    pub fn new(max_requests: u32) -> Self {
        Self {
            max_requests,
            ..Default::default()
        }
    }

    pub fn with_window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    pub fn with_identity(mut self, identity: ClientIdentity) -> Self {
        self.identity = identity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_config_default() {
        let config = RateLimitConfig::default();
        assert_eq!(config.max_requests, 5);
        assert_eq!(config.window, Duration::from_secs(60));
        assert_eq!(config.identity, ClientIdentity::Peer);
    }

    #[test]
    fn test_rate_limit_config_builders() {
        let config = RateLimitConfig::new(10)
            .with_window(Duration::from_secs(1))
            .with_identity(ClientIdentity::Forwarded);

        assert_eq!(config.max_requests, 10);
        assert_eq!(config.window, Duration::from_secs(1));
        assert_eq!(config.identity, ClientIdentity::Forwarded);
    }
}
