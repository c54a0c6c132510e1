//! Core types shared across the Toklab crates

pub mod problemdetails;
pub use problemdetails::{Problem, ProblemDetails};
