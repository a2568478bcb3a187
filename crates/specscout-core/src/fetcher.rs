//! Documentation page retrieval.
//!
//! One `GET` per page with a request timeout and no retries. The body is capped
//! to a character budget before it reaches the analysis engine.

use crate::config::FetchConfig;
use crate::{Error, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Single-attempt HTTP client for documentation pages.
///
/// [`fetch`](Self::fetch) never fails: a page that cannot be retrieved becomes
/// empty content so discovery still runs, just with less to go on.
pub struct Fetcher {
    client: Client,
    max_chars: usize,
}

impl Fetcher {
    /// Creates a fetcher from configuration.
    pub fn new(config: &FetchConfig) -> Result<Self> {
        Self::build(config.timeout(), config.max_chars)
    }

    /// Creates a fetcher with a custom request timeout (primarily for tests)
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        Self::build(timeout, FetchConfig::default().max_chars)
    }

    fn build(timeout: Duration, max_chars: usize) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("specscout/", env!("CARGO_PKG_VERSION")))
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(Error::Network)?;
        Ok(Self { client, max_chars })
    }

    /// Fetches a page, truncated to the configured size; empty on any failure.
    #[instrument(skip_all, fields(url = %url))]
    pub async fn fetch(&self, url: &str) -> String {
        match self.try_fetch(url).await {
            Ok(content) => {
                let truncated = truncate_chars(&content, self.max_chars);
                info!(
                    bytes = content.len(),
                    kept = truncated.len(),
                    "Fetched documentation page"
                );
                truncated.to_string()
            },
            Err(e) => {
                warn!(
                    error = %e,
                    category = e.category(),
                    recoverable = e.is_recoverable(),
                    "Failed to fetch documentation page"
                );
                String::new()
            },
        }
    }

    /// Fetches a page, returning the full body or the reason it failed.
    pub async fn try_fetch(&self, url: &str) -> Result<String> {
        let parsed = Url::parse(url).map_err(|e| Error::InvalidUrl(format!("{url}: {e}")))?;
        debug!("GET {}", parsed);

        let response = self.client.get(parsed).send().await.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout(format!("GET {url}"))
            } else {
                Error::Network(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }
}

/// Returns the longest prefix of `text` holding at most `max_chars` characters.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    text.char_indices()
        .nth(max_chars)
        .map_or(text, |(byte_idx, _)| &text[..byte_idx])
}
