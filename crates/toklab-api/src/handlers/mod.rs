//! HTTP handlers for the tokenization service

mod handler;
mod types;

pub use handler::*;
pub use types::*;
