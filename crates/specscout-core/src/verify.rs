//! Shallow verification that a URL serves an OpenAPI/Swagger document.
//!
//! Two steps: a `HEAD` existence probe (redirects followed), then a full `GET`
//! whose lower-cased body is scanned for a handful of marker substrings. Only
//! the probe status gates; the `GET` body is scanned whatever its status. This
//! is a keyword heuristic, not schema validation; prose that happens to contain
//! `openapi:` will pass.

use crate::config::VerifyConfig;
use crate::{Error, Result};
use reqwest::Client;
use reqwest::redirect::Policy;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Substrings whose presence marks a body as a specification document.
pub const SPEC_MARKERS: [&str; 4] = ["\"openapi\":", "'openapi':", "openapi:", "swagger:"];

/// Message reported for a URL that passed verification.
pub const VALID_MESSAGE: &str = "Valid OpenAPI spec";
/// Message reported for a URL that did not.
pub const INVALID_MESSAGE: &str = "Not a valid OpenAPI spec";

/// Outcome of inspecting one URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verification {
    /// Whether the URL looks like it serves a specification.
    pub valid: bool,
    /// Status of the existence probe, when one was received.
    pub status: Option<u16>,
    /// Why the verdict was reached.
    pub detail: String,
}

impl Verification {
    fn rejected(status: Option<u16>, detail: impl Into<String>) -> Self {
        Self {
            valid: false,
            status,
            detail: detail.into(),
        }
    }

    /// Short human-readable verdict.
    pub const fn message(&self) -> &'static str {
        if self.valid {
            VALID_MESSAGE
        } else {
            INVALID_MESSAGE
        }
    }
}

/// Checks candidate download URLs.
pub struct Verifier {
    head_client: Client,
    get_client: Client,
}

impl Verifier {
    /// Creates a verifier with the configured timeouts.
    pub fn new(config: &VerifyConfig) -> Result<Self> {
        Self::with_timeouts(config.head_timeout(), config.get_timeout())
    }

    /// Creates a verifier with explicit timeouts (primarily for tests).
    pub fn with_timeouts(head_timeout: Duration, get_timeout: Duration) -> Result<Self> {
        Ok(Self {
            head_client: build_client(head_timeout)?,
            get_client: build_client(get_timeout)?,
        })
    }

    /// True when `url` answers the existence probe and its body carries a marker.
    pub async fn verify(&self, url: &str) -> bool {
        self.inspect(url).await.valid
    }

    /// Like [`verify`](Self::verify), but reports the probe status and reason.
    #[instrument(skip_all, fields(url = %url))]
    pub async fn inspect(&self, url: &str) -> Verification {
        let status = match self.head_client.head(url).send().await {
            Ok(response) => response.status(),
            Err(e) => {
                let e = Error::Network(e);
                warn!(
                    error = %e,
                    category = e.category(),
                    recoverable = e.is_recoverable(),
                    "Existence probe failed"
                );
                return Verification::rejected(None, format!("existence probe failed: {e}"));
            },
        };

        if !status.is_success() {
            warn!(status = status.as_u16(), "URL did not answer with success; may not be a spec");
            return Verification::rejected(
                Some(status.as_u16()),
                format!("URL returned {}", status.as_u16()),
            );
        }

        let body = match self.download(url).await {
            Ok(body) => body,
            Err(e) => {
                warn!(
                    error = %e,
                    category = e.category(),
                    recoverable = e.is_recoverable(),
                    "Download failed"
                );
                return Verification::rejected(Some(status.as_u16()), format!("download failed: {e}"));
            },
        };

        if looks_like_spec(&body) {
            info!("Valid OpenAPI spec found");
            Verification {
                valid: true,
                status: Some(status.as_u16()),
                detail: "document contains an OpenAPI/Swagger marker".to_string(),
            }
        } else {
            debug!(bytes = body.len(), "No spec marker in body");
            Verification::rejected(
                Some(status.as_u16()),
                "no OpenAPI/Swagger marker in document",
            )
        }
    }

    async fn download(&self, url: &str) -> Result<String> {
        let response = self.get_client.get(url).send().await?;
        debug!(status = response.status().as_u16(), "Downloaded candidate");
        Ok(response.text().await?)
    }
}

/// Case-insensitive scan for any of [`SPEC_MARKERS`].
pub fn looks_like_spec(body: &str) -> bool {
    let lowered = body.to_lowercase();
    SPEC_MARKERS.iter().any(|marker| lowered.contains(marker))
}

fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("specscout/", env!("CARGO_PKG_VERSION")))
        .redirect(Policy::limited(10))
        .build()
        .map_err(Error::Network)
}
