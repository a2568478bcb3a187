//! Core data types for discovery results.
//!
//! [`SpecLocation`] is the one entity the engine produces. Its enum-typed fields
//! can only hold the documented values, and [`GithubInfo`] can only be built with
//! all three coordinates present, so a `SpecLocation` is valid by construction no
//! matter how messy the reasoning service's answer was.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Serialization format of a specification document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecFormat {
    /// YAML document (the default when the format is not stated).
    #[default]
    Yaml,
    /// JSON document.
    Json,
}

impl SpecFormat {
    /// Wire representation of the format.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Json => "json",
        }
    }
}

impl FromStr for SpecFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            other => Err(Error::Parse(format!("unknown spec format '{other}'"))),
        }
    }
}

/// How a vendor versions its published specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VersioningStrategy {
    /// New versions are published as repository release tags.
    ReleaseTag,
    /// Versions are encoded in file names or paths.
    FileBased,
    /// The version only lives inside the document (`info.version`).
    InSpec,
    /// Could not be determined.
    #[default]
    Unknown,
}

impl VersioningStrategy {
    /// Wire representation of the strategy.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ReleaseTag => "release-tag",
            Self::FileBased => "file-based",
            Self::InSpec => "in-spec",
            Self::Unknown => "unknown",
        }
    }
}

impl FromStr for VersioningStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "release-tag" => Ok(Self::ReleaseTag),
            "file-based" => Ok(Self::FileBased),
            "in-spec" => Ok(Self::InSpec),
            "unknown" => Ok(Self::Unknown),
            other => Err(Error::Parse(format!(
                "unknown versioning strategy '{other}'"
            ))),
        }
    }
}

/// How much downstream automation should trust a result.
///
/// `High` and `Medium` results may be auto-verified; `Low` results need a human.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Strong evidence, e.g. a direct link to the document.
    High,
    /// Plausible but indirect evidence.
    Medium,
    /// Guesswork or a failed analysis.
    #[default]
    Low,
}

impl Confidence {
    /// Wire representation of the confidence level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Whether a result at this level is worth verifying automatically.
    #[must_use]
    pub const fn is_actionable(self) -> bool {
        matches!(self, Self::High | Self::Medium)
    }

    /// Whether a result at this level should go to human review.
    #[must_use]
    pub const fn needs_review(self) -> bool {
        matches!(self, Self::Low)
    }
}

impl FromStr for Confidence {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            other => Err(Error::Parse(format!("unknown confidence '{other}'"))),
        }
    }
}

macro_rules! display_via_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_via_as_str!(SpecFormat, VersioningStrategy, Confidence);

fn normalize(s: &str) -> String {
    s.trim().to_ascii_lowercase().replace('_', "-")
}

/// Coordinates of a specification stored in a code-hosting repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawGithubInfo")]
pub struct GithubInfo {
    owner: String,
    repo: String,
    path: String,
}

#[derive(Deserialize)]
struct RawGithubInfo {
    owner: String,
    repo: String,
    path: String,
}

impl TryFrom<RawGithubInfo> for GithubInfo {
    type Error = Error;

    fn try_from(raw: RawGithubInfo) -> Result<Self> {
        Self::new(raw.owner, raw.repo, raw.path)
    }
}

impl GithubInfo {
    /// Build repository coordinates; every part must be non-empty.
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        path: impl Into<String>,
    ) -> Result<Self> {
        let owner = owner.into().trim().to_string();
        let repo = repo.into().trim().to_string();
        let path = path.into().trim().to_string();

        for (name, value) in [("owner", &owner), ("repo", &repo), ("path", &path)] {
            if value.is_empty() {
                return Err(Error::Parse(format!("github_info.{name} is empty")));
            }
        }

        Ok(Self { owner, repo, path })
    }

    /// Lenient extraction from an untrusted JSON value.
    ///
    /// Returns `None` unless the value is an object with non-empty string
    /// `owner`, `repo` and `path`.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let field = |key: &str| obj.get(key).and_then(Value::as_str);
        Self::new(field("owner")?, field("repo")?, field("path")?).ok()
    }

    /// Repository owner (user or organisation).
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Repository name.
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Path of the specification inside the repository.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// True when both point at the same repository, ignoring case and path.
    #[must_use]
    pub fn same_repository(&self, other: &Self) -> bool {
        self.owner.eq_ignore_ascii_case(&other.owner) && self.repo.eq_ignore_ascii_case(&other.repo)
    }
}

impl fmt::Display for GithubInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}:{}", self.owner, self.repo, self.path)
    }
}

/// Where a vendor's specification lives and how it is versioned.
///
/// Built once per discovery and never mutated afterwards; the consuming `with_*`
/// methods exist only to assemble a value before handing it out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecLocation {
    #[serde(default)]
    download_url: String,
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    format: SpecFormat,
    #[serde(default)]
    versioning_strategy: VersioningStrategy,
    #[serde(default)]
    github_info: Option<GithubInfo>,
    #[serde(default)]
    confidence: Confidence,
    #[serde(default)]
    reasoning: String,
}

impl SpecLocation {
    /// Create a result with the given URL, format, confidence and explanation.
    pub fn new(
        download_url: impl Into<String>,
        format: SpecFormat,
        confidence: Confidence,
        reasoning: impl Into<String>,
    ) -> Self {
        Self {
            download_url: download_url.into(),
            version: None,
            format,
            versioning_strategy: VersioningStrategy::Unknown,
            github_info: None,
            confidence,
            reasoning: reasoning.into(),
        }
    }

    /// The fallback returned whenever analysis fails.
    pub fn failed(error: impl fmt::Display) -> Self {
        Self::new(
            String::new(),
            SpecFormat::Yaml,
            Confidence::Low,
            format!("Error during analysis: {error}"),
        )
    }

    /// Set the version string.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Set the versioning strategy.
    #[must_use]
    pub fn with_versioning_strategy(mut self, strategy: VersioningStrategy) -> Self {
        self.versioning_strategy = strategy;
        self
    }

    /// Attach repository coordinates.
    #[must_use]
    pub fn with_github_info(mut self, info: GithubInfo) -> Self {
        self.github_info = Some(info);
        self
    }

    /// Build a result from the reasoning service's decoded JSON object.
    ///
    /// Every key is optional and every value may have the wrong type; anything
    /// unusable falls back to the field's default.
    #[must_use]
    pub fn from_response_object(obj: &Map<String, Value>) -> Self {
        let text = |key: &str| obj.get(key).and_then(Value::as_str);

        let version = obj.get("version").and_then(|v| match v {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        });

        Self {
            download_url: text("download_url").unwrap_or_default().trim().to_string(),
            version,
            format: text("format")
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
            versioning_strategy: text("versioning_strategy")
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
            github_info: obj.get("github_info").and_then(GithubInfo::from_value),
            confidence: text("confidence")
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
            reasoning: text("reasoning").unwrap_or_default().to_string(),
        }
    }

    /// Direct download URL; empty when nothing was found.
    pub fn download_url(&self) -> &str {
        &self.download_url
    }

    /// Specification version, if it could be determined.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Document format.
    pub const fn format(&self) -> SpecFormat {
        self.format
    }

    /// Vendor's versioning strategy.
    pub const fn versioning_strategy(&self) -> VersioningStrategy {
        self.versioning_strategy
    }

    /// Repository coordinates when the spec lives in a repository.
    pub const fn github_info(&self) -> Option<&GithubInfo> {
        self.github_info.as_ref()
    }

    /// Confidence in the result.
    pub const fn confidence(&self) -> Confidence {
        self.confidence
    }

    /// Explanation of how the result was reached (or why it failed).
    pub fn reasoning(&self) -> &str {
        &self.reasoning
    }

    /// Whether a download URL was found at all.
    pub fn is_found(&self) -> bool {
        !self.download_url.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic, clippy::disallowed_macros)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_enum_parsing_is_lenient_about_case_and_separators() {
        assert_eq!("YAML".parse::<SpecFormat>().unwrap(), SpecFormat::Yaml);
        assert_eq!(" json ".parse::<SpecFormat>().unwrap(), SpecFormat::Json);
        assert_eq!(
            "release_tag".parse::<VersioningStrategy>().unwrap(),
            VersioningStrategy::ReleaseTag
        );
        assert_eq!("High".parse::<Confidence>().unwrap(), Confidence::High);
        assert!("xml".parse::<SpecFormat>().is_err());
        assert!("certain".parse::<Confidence>().is_err());
    }

    #[test]
    fn test_github_info_rejects_empty_parts() {
        assert!(GithubInfo::new("acme", "widgets-oai", "openapi.yaml").is_ok());
        assert!(GithubInfo::new("acme", "", "openapi.yaml").is_err());
        assert!(GithubInfo::new("  ", "widgets-oai", "openapi.yaml").is_err());
    }

    #[test]
    fn test_github_info_from_value_requires_all_fields() {
        assert!(GithubInfo::from_value(&json!({"owner": "acme", "repo": "w"})).is_none());
        assert!(GithubInfo::from_value(&json!({"owner": "acme", "repo": "w", "path": 3})).is_none());
        assert!(GithubInfo::from_value(&json!("acme/w")).is_none());
        assert!(GithubInfo::from_value(&Value::Null).is_none());

        let info =
            GithubInfo::from_value(&json!({"owner": "acme", "repo": "w", "path": "a.yaml"}))
                .unwrap();
        assert_eq!(info.to_string(), "acme/w:a.yaml");
    }

    #[test]
    fn test_same_repository_ignores_case_and_path() {
        let a = GithubInfo::new("Twilio", "twilio-oai", "spec/json/a.json").unwrap();
        let b = GithubInfo::new("twilio", "TWILIO-OAI", "spec/yaml/b.yaml").unwrap();
        let c = GithubInfo::new("twilio", "other", "spec/json/a.json").unwrap();
        assert!(a.same_repository(&b));
        assert!(!a.same_repository(&c));
    }

    #[test]
    fn test_from_response_object_uses_defaults_for_missing_keys() {
        let location = SpecLocation::from_response_object(&Map::new());

        assert_eq!(location.download_url(), "");
        assert_eq!(location.version(), None);
        assert_eq!(location.format(), SpecFormat::Yaml);
        assert_eq!(location.versioning_strategy(), VersioningStrategy::Unknown);
        assert!(location.github_info().is_none());
        assert_eq!(location.confidence(), Confidence::Low);
        assert_eq!(location.reasoning(), "");
        assert!(!location.is_found());
    }

    #[test]
    fn test_from_response_object_tolerates_wrong_types() {
        let location = SpecLocation::from_response_object(&object(json!({
            "download_url": 42,
            "version": 2,
            "format": "xml",
            "versioning_strategy": ["file-based"],
            "github_info": {"owner": "acme", "repo": "", "path": "x.yaml"},
            "confidence": "absolutely",
            "reasoning": null
        })));

        assert_eq!(location.download_url(), "");
        assert_eq!(location.version(), Some("2"));
        assert_eq!(location.format(), SpecFormat::Yaml);
        assert_eq!(location.versioning_strategy(), VersioningStrategy::Unknown);
        assert!(location.github_info().is_none());
        assert_eq!(location.confidence(), Confidence::Low);
        assert_eq!(location.reasoning(), "");
    }

    #[test]
    fn test_blank_version_is_absent() {
        let location = SpecLocation::from_response_object(&object(json!({"version": "  "})));
        assert_eq!(location.version(), None);
    }

    #[test]
    fn test_failed_location_records_error() {
        let location = SpecLocation::failed("connection refused");
        assert_eq!(location.confidence(), Confidence::Low);
        assert!(location.confidence().needs_review());
        assert_eq!(
            location.reasoning(),
            "Error during analysis: connection refused"
        );
        assert!(!location.is_found());
    }

    #[test]
    fn test_serializes_to_wire_shape() {
        let location = SpecLocation::new(
            "https://example.com/openapi.json",
            SpecFormat::Json,
            Confidence::Medium,
            "linked from the reference page",
        )
        .with_version("2.1.0")
        .with_versioning_strategy(VersioningStrategy::InSpec);

        let value = serde_json::to_value(&location).unwrap();
        assert_eq!(
            value,
            json!({
                "download_url": "https://example.com/openapi.json",
                "version": "2.1.0",
                "format": "json",
                "versioning_strategy": "in-spec",
                "github_info": null,
                "confidence": "medium",
                "reasoning": "linked from the reference page"
            })
        );
    }

    #[test]
    fn test_deserialize_rejects_partial_github_info() {
        let result = serde_json::from_value::<SpecLocation>(json!({
            "download_url": "https://example.com/a.yaml",
            "github_info": {"owner": "acme", "repo": "", "path": "a.yaml"}
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_confidence_actionability() {
        assert!(Confidence::High.is_actionable());
        assert!(Confidence::Medium.is_actionable());
        assert!(!Confidence::Low.is_actionable());
    }
}
