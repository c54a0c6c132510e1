use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use toklab_core::Problem;

use crate::limiter::RateLimiter;

/// Admit or reject a request before it reaches the handler.
///
/// Install with `axum::middleware::from_fn_with_state` on the routes that
/// should be throttled. Rejections become a 429 problem response.
pub async fn rate_limit_middleware(
    State(limiter): State<Arc<RateLimiter>>,
    req: Request,
    next: Next,
) -> Result<Response, Problem> {
    let client = limiter
        .config()
        .identity
        .client_key(req.headers(), req.extensions());

    limiter.check(&client)?;

    Ok(next.run(req).await)
}
