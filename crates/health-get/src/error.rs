//! Retrieval Error Types

use thiserror::Error;

/// Errors that can occur while fetching a health document
#[derive(Debug, Error)]
pub enum FetchError {
    /// Target could not be parsed as a URL
    #[error("{url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Connection or transfer failure
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Body is not a health document
    #[error("Invalid health document: {0}")]
    Decode(#[from] serde_json::Error),
}
