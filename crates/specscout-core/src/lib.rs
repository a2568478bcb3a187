//! # specscout-core
//!
//! Locates the downloadable OpenAPI specification for a vendor API, starting from
//! the vendor's documentation page.
//!
//! A discovery fetches the page, hands it to a reasoning service together with a
//! fixed instruction, and interprets the structured answer as a [`SpecLocation`].
//! A separate, shallow check confirms that a candidate URL really serves an
//! OpenAPI or Swagger document.
//!
//! ## Architecture
//!
//! - **Fetcher**: bounded, single-attempt retrieval of documentation pages
//! - **Reasoning**: the [`ReasoningService`] seam and its Anthropic implementation
//! - **Analysis**: prompt construction and defensive response parsing
//! - **Verify**: existence probe plus keyword heuristic
//! - **Registry**: shaping results into connector-registry records
//!
//! ## Failure Model
//!
//! The discovery flow degrades instead of failing. An unreachable page is analyzed
//! as empty content, a failed analysis yields a low-confidence result whose
//! `reasoning` carries the cause, and a failed verification is simply `false`.
//!
//! ```rust
//! use specscout_core::{Confidence, SpecLocation};
//!
//! let location = SpecLocation::failed("service unavailable");
//! assert!(!location.is_found());
//! assert_eq!(location.confidence(), Confidence::Low);
//! assert_eq!(location.reasoning(), "Error during analysis: service unavailable");
//! ```

/// Prompt construction and response interpretation
pub mod analysis;
/// Configuration loading and defaults
pub mod config;
/// The discovery facade
pub mod discovery;
/// Error types and result aliases
pub mod error;
/// Documentation page retrieval
pub mod fetcher;
/// Reasoning service boundary
pub mod reasoning;
/// Connector-registry records
pub mod registry;
/// Core data types
pub mod types;
/// Candidate URL verification
pub mod verify;

// Re-export commonly used types
pub use analysis::{AnalysisInput, Analyzer};
pub use config::{Config, FetchConfig, ReasoningConfig, ServerConfig, VerifyConfig};
pub use discovery::{DiscoveryRequest, SpecDiscovery};
pub use error::{Error, Result};
pub use fetcher::Fetcher;
pub use reasoning::{AnthropicClient, ReasoningService};
pub use registry::{RegistryEntry, SourceCheck, compare_github_source};
pub use types::*;
pub use verify::{Verification, Verifier, looks_like_spec};
