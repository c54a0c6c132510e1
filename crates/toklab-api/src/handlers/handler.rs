//! HTTP handlers for tokenization

use std::sync::Arc;

use axum::{extract::State, Json};
use toklab_core::problemdetails::{Problem, ProblemDetails};
use tracing::info;
use utoipa::OpenApi;

use super::types::*;

/// OpenAPI documentation for the tokenization endpoints
#[derive(OpenApi)]
#[openapi(
    paths(tokenize, health),
    components(schemas(TextInput, TokenizationResponse, HealthResponse, ProblemDetails)),
    tags(
        (name = "Tokenization", description = "Compare tokenization methods on the same text"),
        (name = "Health", description = "Service liveness")
    )
)]
pub struct ApiDoc;

/// Tokenize a text with every method
///
/// Methods run one after the other in a fixed order: Regex, NLTK, spaCy,
/// BERT, tiktoken. If any method fails, no results are returned.
#[utoipa::path(
    tag = "Tokenization",
    post,
    path = "/tokenize",
    request_body = TextInput,
    responses(
        (status = 200, description = "One entry per method, in fixed order", body = Vec<TokenizationResponse>),
        (status = 429, description = "Too many requests from this client", body = ProblemDetails),
        (status = 500, description = "A tokenization method failed", body = ProblemDetails)
    )
)]
pub async fn tokenize(
    State(state): State<Arc<AppState>>,
    Json(input): Json<TextInput>,
) -> Result<Json<Vec<TokenizationResponse>>, Problem> {
    let results = state.comparison.compare(&input.text).await?;

    info!(
        "Tokenized {} chars with {} methods",
        input.text.chars().count(),
        results.len()
    );

    Ok(Json(results.into_iter().map(Into::into).collect()))
}

/// Liveness check
#[utoipa::path(
    tag = "Health",
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
