//! Analysis engine: turns a fetched documentation page into a [`SpecLocation`].
//!
//! One call to the reasoning service per analysis, no retries and no follow-up
//! turns. Whatever comes back (or fails to come back) is turned into a valid
//! `SpecLocation`; [`Analyzer::analyze`] has no error path.
//!
//! ## Response Handling
//!
//! The service is asked for bare JSON but often wraps it in a Markdown fence.
//! [`strip_code_fence`] removes the first fence, [`parse_response`] decodes the
//! object strictly and then extracts fields leniently.
//!
//! ```rust
//! use specscout_core::analysis::{parse_response, strip_code_fence};
//!
//! let fenced = "```json\n{\"confidence\": \"high\"}\n```";
//! assert_eq!(strip_code_fence(fenced), "{\"confidence\": \"high\"}");
//!
//! let location = parse_response(fenced)?;
//! assert_eq!(location.confidence().as_str(), "high");
//! # Ok::<(), specscout_core::Error>(())
//! ```

use crate::config::ReasoningConfig;
use crate::fetcher::truncate_chars;
use crate::reasoning::ReasoningService;
use crate::{Error, Result, SpecLocation};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Fixed task description sent as the system instruction.
pub const SYSTEM_PROMPT: &str = r#"You are an expert at finding OpenAPI specifications from vendor documentation.

Your task is to analyze documentation pages and determine:
1. Where the OpenAPI spec file is located
2. How to download it
3. What versioning strategy the vendor uses
4. The format (YAML or JSON)

Return your findings in this exact JSON format:
{
  "download_url": "direct URL to download the spec",
  "version": "version string or null if unknown",
  "format": "yaml or json",
  "versioning_strategy": "release-tag | file-based | in-spec | unknown",
  "github_info": {
    "owner": "github-owner",
    "repo": "repo-name",
    "path": "path/to/spec.yaml"
  } or null,
  "confidence": "high | medium | low",
  "reasoning": "explain why you believe this is correct"
}

Common patterns to look for:
- Links to GitHub repositories with OpenAPI specs
- Direct download links to .yaml or .json files
- API reference sections mentioning "OpenAPI", "Swagger", "OAS"
- Developer resources or API documentation downloads
- Version numbers in URLs or page content
"#;

/// Everything the engine knows about one discovery target.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisInput<'a> {
    /// Vendor name, e.g. `salesforce`.
    pub vendor: &'a str,
    /// API name within the vendor, e.g. `marketing-cloud`.
    pub api_name: &'a str,
    /// Documentation page the content came from.
    pub documentation_url: &'a str,
    /// Fetched page content; may be empty.
    pub content: &'a str,
    /// Free-text hints about where to look.
    pub hints: &'a [String],
}

/// Build the per-call user instruction.
///
/// Content beyond `content_chars` characters is dropped.
pub fn build_user_prompt(input: &AnalysisInput<'_>, content_chars: usize) -> String {
    let hints = input
        .hints
        .iter()
        .map(|hint| format!("- {hint}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Find the OpenAPI specification for: {} {}\n\n\
         Documentation URL: {}\n\n\
         Hints:\n{hints}\n\n\
         Documentation page content (truncated):\n{}\n\n\
         Analyze this page and find where I can download the OpenAPI specification.\n\
         Return ONLY valid JSON, no other text.",
        input.vendor,
        input.api_name,
        input.documentation_url,
        truncate_chars(input.content, content_chars)
    )
}

/// Extract the body of the first fenced code block, if any.
///
/// A ```` ```json ```` fence wins over a plain ```` ``` ```` fence. An unterminated
/// fence yields everything after the opener. Text without a fence is returned
/// trimmed but otherwise unchanged.
pub fn strip_code_fence(text: &str) -> &str {
    const JSON_FENCE: &str = "```json";
    const FENCE: &str = "```";

    let body = if let Some(start) = text.find(JSON_FENCE) {
        &text[start + JSON_FENCE.len()..]
    } else if let Some(start) = text.find(FENCE) {
        &text[start + FENCE.len()..]
    } else {
        return text.trim();
    };

    body.find(FENCE).map_or(body, |end| &body[..end]).trim()
}

/// Decode a reasoning service response into a [`SpecLocation`].
///
/// Fails only when the (fence-stripped) text is not JSON or not a JSON object;
/// individual fields never cause a failure.
pub fn parse_response(text: &str) -> Result<SpecLocation> {
    let value: Value = serde_json::from_str(strip_code_fence(text))
        .map_err(|e| Error::Parse(format!("response is not valid JSON: {e}")))?;

    let Value::Object(obj) = value else {
        return Err(Error::Parse(
            "response JSON is not an object".to_string(),
        ));
    };

    Ok(SpecLocation::from_response_object(&obj))
}

/// Prompt builder and response interpreter around a reasoning service.
pub struct Analyzer {
    service: Arc<dyn ReasoningService>,
    max_tokens: u32,
    content_chars: usize,
}

impl Analyzer {
    /// Create an analyzer that uses `service` with the given prompt settings.
    pub fn new(service: Arc<dyn ReasoningService>, config: &ReasoningConfig) -> Self {
        Self {
            service,
            max_tokens: config.max_tokens,
            content_chars: config.prompt_content_chars,
        }
    }

    /// Analyze one page. Never fails; errors become a low-confidence result.
    #[instrument(skip_all, fields(vendor = %input.vendor, api = %input.api_name))]
    pub async fn analyze(&self, input: &AnalysisInput<'_>) -> SpecLocation {
        let user_prompt = build_user_prompt(input, self.content_chars);
        debug!(prompt_chars = user_prompt.len(), "Calling reasoning service");

        let outcome = match self
            .service
            .complete(SYSTEM_PROMPT, &user_prompt, self.max_tokens)
            .await
        {
            Ok(text) => parse_response(&text),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(location) => {
                info!(
                    confidence = %location.confidence(),
                    found = location.is_found(),
                    "Analysis complete"
                );
                location
            },
            Err(e) => {
                warn!(
                    error = %e,
                    category = e.category(),
                    recoverable = e.is_recoverable(),
                    "Analysis failed; returning low-confidence result"
                );
                SpecLocation::failed(e)
            },
        }
    }
}
