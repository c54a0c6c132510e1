use axum::{
    extract::Request,
    http::{
        header::{CACHE_CONTROL, EXPIRES, PRAGMA},
        HeaderValue,
    },
    middleware::Next,
    response::Response,
};

pub const NO_CACHE_CONTROL: &str = "no-store, no-cache, must-revalidate, max-age=0";

/// Forbid clients and intermediaries from caching any response.
///
/// Existing caching headers are overwritten, including the ones `ServeDir`
/// sets on static files.
pub async fn no_cache_headers(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;

    let headers = response.headers_mut();
    headers.insert(CACHE_CONTROL, HeaderValue::from_static(NO_CACHE_CONTROL));
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(EXPIRES, HeaderValue::from_static("0"));

    response
}
