//! Health Document Retrieval
//!
//! Fetches the JSON status document served by `health-http` and renders
//! it, with each formatted error regrouped into its reason chain.

mod client;
mod error;
mod tree;

pub use client::{fix_url, HealthClient, DEFAULT_PATH};
pub use error::FetchError;
pub use tree::render;
