//! Router assembly

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use toklab_ratelimit::{rate_limit_middleware, RateLimiter};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::ServerConfig;
use crate::handlers::{health, tokenize, ApiDoc, AppState};
use crate::middleware::no_cache_headers;

pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Create the service router
///
/// Only `/tokenize` is rate limited. Every response, including static files,
/// errors and CORS preflights, carries the no-cache headers.
pub fn create_router(state: Arc<AppState>, limiter: Arc<RateLimiter>, config: &ServerConfig) -> Router {
    // Rate limited before the body is parsed
    let tokenize_routes = Router::new()
        .route("/tokenize", post(tokenize))
        .route_layer(middleware::from_fn_with_state(limiter, rate_limit_middleware));

    let api_routes = Router::new()
        .merge(tokenize_routes)
        .route("/health", get(health))
        .with_state(state);

    let docs = if config.swagger_ui {
        Router::new().merge(SwaggerUi::new("/swagger-ui").url(OPENAPI_PATH, ApiDoc::openapi()))
    } else {
        Router::new().route(OPENAPI_PATH, get(|| async { Json(ApiDoc::openapi()) }))
    };

    Router::new()
        .merge(api_routes)
        .merge(docs)
        .route_service("/", ServeFile::new(config.index_file()))
        .nest_service("/static", ServeDir::new(&config.static_dir))
        .layer(CatchPanicLayer::new())
        .layer(CorsLayer::very_permissive())
        .layer(middleware::from_fn(no_cache_headers))
        .layer(TraceLayer::new_for_http())
}
