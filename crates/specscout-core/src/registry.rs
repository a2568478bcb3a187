//! Connector-registry records built from discovery results.
//!
//! Pure data shaping: nothing here performs I/O. The CLI prints these records;
//! persisting them is left to whoever consumes the output.

use crate::types::{GithubInfo, SpecLocation, VersioningStrategy};
use serde::Serialize;

const MODULE_VERSION: &str = "1.0.0-SNAPSHOT";
const FREQUENCY: &str = "weekly";

/// How a connector's source was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscoveryMode {
    /// A repository was identified, via the agent.
    Hybrid,
    /// Only a direct download URL (or nothing) was identified.
    AgentAssisted,
}

/// A registry record for one vendor API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryEntry {
    /// `<vendor>-<api>`.
    pub id: String,
    /// Vendor name as given.
    pub vendor: String,
    /// API name as given.
    pub api: String,
    /// Display name, e.g. `Acme Widgets API`.
    pub name: String,
    /// Connector module repository name.
    pub connector_repo: String,
    /// Initial connector module version.
    pub module_version: String,
    /// How often the source should be re-checked.
    pub frequency: String,
    /// How the source was found.
    pub discovery_mode: DiscoveryMode,
    /// Where the spec comes from.
    pub sources: Sources,
    /// Descriptive metadata.
    pub metadata: Metadata,
    /// Version tracking state.
    pub version_tracking: VersionTracking,
    /// Context carried into later discoveries.
    pub agent_context: AgentContext,
}

/// Source locations for a registry record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sources {
    /// Documentation page discovery started from.
    pub documentation_url: String,
    /// Repository source, when one was found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<GithubSource>,
}

/// Repository source for a registry record.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GithubSource {
    pub owner: String,
    pub repo: String,
    pub spec_path: String,
    pub versioning_strategy: VersioningStrategy,
}

#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub base_url: String,
    pub documentation_url: String,
    pub description: String,
    pub tags: Vec<String>,
}

#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionTracking {
    pub last_known_version: String,
    pub last_checked: Option<String>,
    pub last_content_hash: Option<String>,
}

#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentContext {
    pub hints: Vec<String>,
    pub previous_findings: SpecLocation,
}

impl RegistryEntry {
    /// Build a record for `vendor`/`api` from a discovery result.
    pub fn from_discovery(
        vendor: &str,
        api: &str,
        location: &SpecLocation,
        documentation_url: &str,
    ) -> Self {
        let display = format!("{} {} API", title_case(vendor), title_case(api));

        let github = location.github_info().map(|info| GithubSource {
            owner: info.owner().to_string(),
            repo: info.repo().to_string(),
            spec_path: info.path().to_string(),
            versioning_strategy: location.versioning_strategy(),
        });
        let discovery_mode = if github.is_some() {
            DiscoveryMode::Hybrid
        } else {
            DiscoveryMode::AgentAssisted
        };

        Self {
            id: format!("{vendor}-{api}"),
            vendor: vendor.to_string(),
            api: api.to_string(),
            name: display.clone(),
            connector_repo: format!("module-ballerinax-{vendor}.{api}"),
            module_version: MODULE_VERSION.to_string(),
            frequency: FREQUENCY.to_string(),
            discovery_mode,
            sources: Sources {
                documentation_url: documentation_url.to_string(),
                github,
            },
            metadata: Metadata {
                base_url: format!("https://api.{vendor}.com"),
                documentation_url: documentation_url.to_string(),
                description: display,
                tags: vec![vendor.to_string(), api.to_string()],
            },
            version_tracking: VersionTracking {
                last_known_version: location.version().unwrap_or("unknown").to_string(),
                last_checked: None,
                last_content_hash: None,
            },
            agent_context: AgentContext {
                hints: Vec::new(),
                previous_findings: location.clone(),
            },
        }
    }
}

/// Result of comparing a known repository against what discovery found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceCheck {
    /// Discovery points at the same owner and repository.
    Confirmed,
    /// Discovery points somewhere else.
    Different(GithubInfo),
    /// Discovery did not identify a repository.
    NoRepository,
}

/// Compare an existing repository source with a discovery result.
pub fn compare_github_source(existing: &GithubInfo, found: &SpecLocation) -> SourceCheck {
    match found.github_info() {
        Some(info) if info.same_repository(existing) => SourceCheck::Confirmed,
        Some(info) => SourceCheck::Different(info.clone()),
        None => SourceCheck::NoRepository,
    }
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}
