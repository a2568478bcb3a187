//! Error types for specscout-core operations.
//!
//! Most of the discovery flow is fail-soft: fetch failures become empty content,
//! reasoning failures become a low-confidence [`SpecLocation`](crate::SpecLocation),
//! and verification failures become `false`. The error type below is what the
//! fallible primitives underneath those wrappers return, so callers that want the
//! underlying cause (the CLI, tests, custom orchestration) can still get at it.
//!
//! ## Error Categories
//!
//! - **Network Errors**: HTTP transport failures, timeouts, non-success statuses
//! - **Reasoning Errors**: the reasoning service answered with an error payload
//! - **Parse Errors**: a response could not be interpreted
//! - **Configuration Errors**: invalid or unreadable settings
//!
//! ```rust
//! use specscout_core::Error;
//!
//! let err = Error::Timeout("documentation fetch".to_string());
//! assert!(err.is_recoverable());
//! assert_eq!(err.category(), "timeout");
//! ```

use thiserror::Error;

/// The main error type for specscout-core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Network operation failed.
    ///
    /// The underlying `reqwest::Error` is preserved so timeouts and connection
    /// failures can be told apart.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A request completed but the server answered with a non-success status.
    #[error("HTTP {status} from '{url}'")]
    Http {
        /// Status code returned by the server.
        status: u16,
        /// URL that was requested.
        url: String,
    },

    /// URL is malformed or uses an unsupported scheme.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The reasoning service returned an error or an unusable payload.
    #[error("Reasoning service error: {0}")]
    Reasoning(String),

    /// Response text could not be interpreted.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration is invalid or inaccessible.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Operation timed out.
    #[error("Timeout: {0}")]
    Timeout(String),
}

impl Error {
    /// Check if the error might go away if the operation were repeated.
    ///
    /// Nothing in this crate retries on its own; the flag is logged with every
    /// degraded result so operators can tell a flaky upstream from a bad URL.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Network(e) => e.is_timeout() || e.is_connect(),
            Self::Timeout(_) => true,
            Self::Http { status, .. } => *status == 429 || (500..=599).contains(status),
            _ => false,
        }
    }

    /// Get the error category as a string identifier for logging.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Network(_) | Self::Http { .. } => "network",
            Self::InvalidUrl(_) => "invalid_url",
            Self::Reasoning(_) => "reasoning",
            Self::Parse(_) => "parse",
            Self::Config(_) => "config",
            Self::Timeout(_) => "timeout",
        }
    }
}

/// Convenience type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic, clippy::disallowed_macros)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_formatting() {
        let cases = vec![
            (
                Error::Http {
                    status: 404,
                    url: "https://example.com/openapi.yaml".to_string(),
                },
                "HTTP 404 from 'https://example.com/openapi.yaml'",
            ),
            (
                Error::Reasoning("overloaded".to_string()),
                "Reasoning service error: overloaded",
            ),
            (Error::Parse("eof".to_string()), "Parse error: eof"),
            (
                Error::InvalidUrl("not a url".to_string()),
                "Invalid URL: not a url",
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.to_string(), expected);
        }
    }

    #[test]
    fn test_error_recoverability() {
        assert!(Error::Timeout("slow".into()).is_recoverable());
        assert!(
            Error::Http {
                status: 503,
                url: "https://example.com".into()
            }
            .is_recoverable()
        );
        assert!(
            Error::Http {
                status: 429,
                url: "https://example.com".into()
            }
            .is_recoverable()
        );
        assert!(
            !Error::Http {
                status: 404,
                url: "https://example.com".into()
            }
            .is_recoverable()
        );
        assert!(!Error::Parse("bad".into()).is_recoverable());
        assert!(!Error::Config("bad".into()).is_recoverable());
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(Error::Reasoning(String::new()).category(), "reasoning");
        assert_eq!(Error::Config(String::new()).category(), "config");
        assert_eq!(Error::InvalidUrl(String::new()).category(), "invalid_url");
        assert_eq!(
            Error::Http {
                status: 500,
                url: String::new()
            }
            .category(),
            "network"
        );
    }
}
