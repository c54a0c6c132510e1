//! Rate limiter error types

use axum::http::StatusCode;
use thiserror::Error;
use toklab_core::problemdetails::{self, Problem};

/// Detail returned to throttled clients
pub const RATE_LIMIT_MESSAGE: &str = "Too many requests. Please try again in a minute.";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RateLimitError {
    #[error("Too many requests from {client}")]
    TooManyRequests { client: String },
}

impl From<RateLimitError> for Problem {
    fn from(error: RateLimitError) -> Self {
        match error {
            RateLimitError::TooManyRequests { .. } => {
                problemdetails::new(StatusCode::TOO_MANY_REQUESTS).with_detail(RATE_LIMIT_MESSAGE)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_many_requests_problem() {
        let problem: Problem = RateLimitError::TooManyRequests {
            client: "10.0.0.7".to_string(),
        }
        .into();

        assert_eq!(problem.status_code, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(problem.detail(), Some(RATE_LIMIT_MESSAGE));
    }
}
