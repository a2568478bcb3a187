//! The discovery facade: fetch, analyze, and (separately) verify.

use crate::analysis::{AnalysisInput, Analyzer};
use crate::config::Config;
use crate::fetcher::Fetcher;
use crate::reasoning::ReasoningService;
use crate::types::SpecLocation;
use crate::verify::{Verification, Verifier};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

/// One discovery target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryRequest {
    /// Vendor name, e.g. `acme`.
    pub vendor: String,
    /// API name within the vendor, e.g. `widgets`.
    pub api_name: String,
    /// Documentation page to start from.
    pub documentation_url: String,
    /// Optional free-text hints for the reasoning service.
    #[serde(default)]
    pub hints: Vec<String>,
}

impl DiscoveryRequest {
    /// Create a request without hints.
    pub fn new(
        vendor: impl Into<String>,
        api_name: impl Into<String>,
        documentation_url: impl Into<String>,
    ) -> Self {
        Self {
            vendor: vendor.into(),
            api_name: api_name.into(),
            documentation_url: documentation_url.into(),
            hints: Vec::new(),
        }
    }

    /// Attach hints.
    #[must_use]
    pub fn with_hints(mut self, hints: Vec<String>) -> Self {
        self.hints = hints;
        self
    }
}

/// Owns the fetcher, analyzer and verifier used for every discovery.
///
/// Calls are stateless; one instance can serve many concurrent requests.
pub struct SpecDiscovery {
    fetcher: Fetcher,
    analyzer: Analyzer,
    verifier: Verifier,
}

impl SpecDiscovery {
    /// Build from configuration and an injected reasoning service.
    pub fn new(config: &Config, service: Arc<dyn ReasoningService>) -> Result<Self> {
        Ok(Self {
            fetcher: Fetcher::new(&config.fetch)?,
            analyzer: Analyzer::new(service, &config.reasoning),
            verifier: Verifier::new(&config.verify)?,
        })
    }

    /// Fetch the documentation page and ask the reasoning service where the spec is.
    ///
    /// Never fails. An unreachable page is analyzed as empty content; a failed
    /// analysis comes back as [`SpecLocation::failed`].
    #[instrument(skip_all, fields(vendor = %request.vendor, api = %request.api_name))]
    pub async fn discover_spec(&self, request: &DiscoveryRequest) -> SpecLocation {
        info!(url = %request.documentation_url, "Discovering OpenAPI spec");

        let content = self.fetcher.fetch(&request.documentation_url).await;
        let input = AnalysisInput {
            vendor: &request.vendor,
            api_name: &request.api_name,
            documentation_url: &request.documentation_url,
            content: &content,
            hints: &request.hints,
        };

        self.analyzer.analyze(&input).await
    }

    /// Whether `url` appears to serve an OpenAPI/Swagger document.
    pub async fn verify_spec_url(&self, url: &str) -> bool {
        self.verifier.verify(url).await
    }

    /// Verification with status and reason.
    pub async fn inspect_spec_url(&self, url: &str) -> Verification {
        self.verifier.inspect(url).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic, clippy::disallowed_macros)]
mod tests {
    use super::*;
    use crate::{Confidence, Error};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Default)]
    struct Recording {
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ReasoningService for Recording {
        async fn complete(&self, _system: &str, user: &str, _max_tokens: u32) -> Result<String> {
            self.prompts.lock().unwrap().push(user.to_string());
            Err(Error::Reasoning("offline".to_string()))
        }
    }

    #[tokio::test]
    async fn test_fetched_content_reaches_prompt() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/docs"))
            .respond_with(ResponseTemplate::new(200).set_body_string("see openapi.yaml on GitHub"))
            .expect(1)
            .mount(&server)
            .await;

        let service = Arc::new(Recording::default());
        let discovery = SpecDiscovery::new(&Config::default(), service.clone()).unwrap();
        let request = DiscoveryRequest::new("acme", "widgets", format!("{}/docs", server.uri()))
            .with_hints(vec!["check the SDK repo".to_string()]);

        let result = discovery.discover_spec(&request).await;

        assert_eq!(result.confidence(), Confidence::Low);
        assert_eq!(result.reasoning(), "Error during analysis: Reasoning service error: offline");

        let prompts = service.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("see openapi.yaml on GitHub"));
        assert!(prompts[0].contains("- check the SDK repo"));
    }

    #[tokio::test]
    async fn test_unreachable_docs_still_analyzed() {
        let service = Arc::new(Recording::default());
        let discovery = SpecDiscovery::new(&Config::default(), service.clone()).unwrap();

        let result = discovery
            .discover_spec(&DiscoveryRequest::new("acme", "widgets", "not a url"))
            .await;

        assert!(!result.is_found());
        assert_eq!(service.prompts.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_request_hints_default_to_empty() {
        let request: DiscoveryRequest = serde_json::from_str(
            r#"{"vendor":"acme","api_name":"widgets","documentation_url":"https://x"}"#,
        )
        .unwrap();
        assert!(request.hints.is_empty());
    }
}
