//! # Toklab API
//!
//! HTTP surface of the tokenizer comparison service:
//!
//! - `POST /tokenize` runs every method on a text (rate limited per client)
//! - `GET /` and `GET /static/*` serve the browser UI
//! - `GET /health` and `GET /api-docs/openapi.json`
//!
//! Build the router with [`create_router`] and serve it with
//! `into_make_service_with_connect_info::<SocketAddr>()` so the rate limiter
//! can see the peer address.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use config::ServerConfig;
pub use handlers::{ApiDoc, AppState, TextInput, TokenizationResponse};
pub use router::{create_router, OPENAPI_PATH};
