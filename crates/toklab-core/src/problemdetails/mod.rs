use std::collections::BTreeMap;

use serde_json::Value;

use axum::http::{header::CONTENT_TYPE, HeaderValue, StatusCode};
use axum::{response::IntoResponse, Json};
use serde::Serialize;

use utoipa::ToSchema;

/// Media type used for problem responses (RFC 7807).
pub const PROBLEM_CONTENT_TYPE: &str = "application/problem+json";

/// Documented shape of an error body returned by the API.
///
/// Only `detail` is populated by the service, which keeps error bodies
/// compatible with clients that expect `{ "detail": "..." }`.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[schema(example = json!({
    "detail": "Too many requests. Please try again in a minute."
}))]
pub struct ProblemDetails {
    /// A human-readable explanation specific to this occurrence of the problem
    #[schema(example = "Too many requests. Please try again in a minute.")]
    pub detail: String,
}

/// Representation of a Problem error to return to the client.
#[derive(Debug, Clone)]
pub struct Problem {
    /// The status code of the problem.
    pub status_code: StatusCode,
    /// The actual body of the problem.
    pub body: BTreeMap<String, Value>,
}

/// Create a new `Problem` response to send to the client.
pub fn new<S>(status_code: S) -> Problem
where
    S: Into<StatusCode>,
{
    Problem {
        status_code: status_code.into(),
        body: BTreeMap::new(),
    }
}

impl Problem {
    /// Specify the "detail" to use for the problem.
    pub fn with_detail<S>(self, value: S) -> Self
    where
        S: Into<String>,
    {
        self.with_value("detail", value.into())
    }

    /// Specify an arbitrary value to include in the problem.
    pub fn with_value<V>(mut self, key: &str, value: V) -> Self
    where
        V: Into<Value>,
    {
        self.body.insert(key.to_owned(), value.into());

        self
    }

    /// The "detail" member, if one was set.
    pub fn detail(&self) -> Option<&str> {
        self.body.get("detail").and_then(Value::as_str)
    }
}

impl<S> From<S> for Problem
where
    S: Into<StatusCode>,
{
    fn from(status_code: S) -> Self {
        new(status_code.into())
    }
}

/// Result type where the error is always a `Problem`.
pub type Result<T> = std::result::Result<T, Problem>;

impl IntoResponse for Problem {
    fn into_response(self) -> axum::response::Response {
        if self.body.is_empty() {
            self.status_code.into_response()
        } else {
            let body = Json(self.body);
            let mut response = (self.status_code, body).into_response();

            response.headers_mut().insert(
                CONTENT_TYPE,
                HeaderValue::from_static(PROBLEM_CONTENT_TYPE),
            );
            response
        }
    }
}
