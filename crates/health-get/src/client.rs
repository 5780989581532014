//! Health Endpoint Client

use health::Response;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::error::FetchError;

/// Path used when the target has none
pub const DEFAULT_PATH: &str = "/health";

/// Default timeout for a single fetch
const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Complete a bare target into a health URL.
///
/// A missing scheme becomes `http` and a missing path becomes `/health`.
/// The flag is set when anything was filled in.
pub fn fix_url(target: &str) -> Result<(Url, bool), FetchError> {
    let mut fixed = false;

    let target = if target.contains("://") {
        target.to_string()
    } else {
        fixed = true;
        format!("http://{}", target)
    };

    let mut url = Url::parse(&target).map_err(|source| FetchError::InvalidUrl {
        url: target.clone(),
        source,
    })?;

    // Url normalizes an absent path to "/", so look at what was typed
    // before any query or fragment
    let typed_path = target.split_once("://").map_or(false, |(_, rest)| {
        rest.split(|c| c == '?' || c == '#')
            .next()
            .map_or(false, |head| head.contains('/'))
    });
    if url.path() == "/" && !typed_path {
        fixed = true;
        url.set_path(DEFAULT_PATH);
    }

    Ok((url, fixed))
}

/// HTTP client for health documents
pub struct HealthClient {
    http: reqwest::Client,
}

impl HealthClient {
    /// Create a client with the default timeout
    pub fn new() -> Result<Self, FetchError> {
        Self::with_timeout(Duration::from_millis(DEFAULT_TIMEOUT_MS))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http })
    }

    /// GET the document at `url` and decode it
    pub async fn fetch(&self, url: &Url) -> Result<Response, FetchError> {
        debug!("Fetching {}", url);

        let body = self.http.get(url.clone()).send().await?.text().await?;
        let response: Response = serde_json::from_str(&body)?;

        debug!(
            "Status {} with {} errors",
            response.status,
            response.errors.as_ref().map_or(0, Vec::len)
        );
        Ok(response)
    }
}
