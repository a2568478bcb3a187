//! `specscout batch`: discover every target in a manifest.
//!
//! Manifests are JSON or TOML, chosen by file extension:
//!
//! ```toml
//! [[targets]]
//! vendor = "acme"
//! api = "widgets"
//! documentation_url = "https://docs.acme.dev/api"
//! hints = ["Check API reference"]
//! ```
//!
//! A JSON manifest may also be a bare array of targets. Entries are printed in
//! manifest order regardless of `--concurrency`.

use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use colored::Colorize;
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use specscout_core::{DiscoveryRequest, RegistryEntry, SpecDiscovery, Verification};
use tracing::info;

use super::{Verified, paint_confidence, verify_if_actionable};
use crate::output::{OutputFormat, print_json};

/// One manifest row.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Target {
    /// Vendor name.
    pub vendor: String,
    /// API name within the vendor.
    #[serde(alias = "api_name")]
    pub api: String,
    /// Documentation page to start from.
    #[serde(alias = "doc_url")]
    pub documentation_url: String,
    /// Optional hints.
    #[serde(default)]
    pub hints: Vec<String>,
}

/// A parsed manifest.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Manifest {
    /// Targets in the order they should be reported.
    pub targets: Vec<Target>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonManifest {
    List(Vec<Target>),
    Table(Manifest),
}

impl Manifest {
    /// Read a manifest, choosing the parser from the file extension.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest {}", path.display()))?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("toml") => Self::from_toml(&content),
            Some("json") => Self::from_json(&content),
            _ => bail!(
                "Unsupported manifest type for {} (expected .json or .toml)",
                path.display()
            ),
        }
    }

    /// Parse a TOML manifest with a `[[targets]]` array.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid TOML manifest")
    }

    /// Parse a JSON manifest: `{"targets": [...]}` or a bare array.
    pub fn from_json(content: &str) -> Result<Self> {
        let parsed: JsonManifest =
            serde_json::from_str(content).context("Invalid JSON manifest")?;
        Ok(match parsed {
            JsonManifest::List(targets) => Self { targets },
            JsonManifest::Table(manifest) => manifest,
        })
    }
}

#[derive(Serialize)]
struct BatchReport<'a> {
    generated: String,
    entries: Vec<Verified<'a, RegistryEntry>>,
}

/// Execute the batch command.
pub async fn execute(
    discovery: &SpecDiscovery,
    manifest_path: &Path,
    concurrency: usize,
    verify: bool,
    format: OutputFormat,
) -> Result<()> {
    let manifest = Manifest::load(manifest_path)?;
    info!(
        targets = manifest.targets.len(),
        concurrency, "Starting batch discovery"
    );

    let results: Vec<(RegistryEntry, Option<Verification>)> =
        stream::iter(manifest.targets.into_iter().map(|target| async move {
            let request = DiscoveryRequest::new(
                target.vendor.clone(),
                target.api.clone(),
                target.documentation_url.clone(),
            )
            .with_hints(target.hints);
            let location = discovery.discover_spec(&request).await;
            let verification = if verify {
                verify_if_actionable(discovery, &location).await
            } else {
                None
            };
            let entry = RegistryEntry::from_discovery(
                &target.vendor,
                &target.api,
                &location,
                &target.documentation_url,
            );
            (entry, verification)
        }))
        .buffered(concurrency.max(1))
        .collect()
        .await;

    match format {
        OutputFormat::Json => {
            let report = BatchReport {
                generated: Utc::now().to_rfc3339(),
                entries: results
                    .iter()
                    .map(|(entry, verification)| Verified::new(entry, verification.as_ref()))
                    .collect(),
            };
            print_json(&report)?;
        },
        OutputFormat::Text => print_summary(&results),
    }
    Ok(())
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Tally {
    found: usize,
    needs_review: usize,
}

fn tally<'a>(entries: impl IntoIterator<Item = &'a RegistryEntry>) -> Tally {
    entries.into_iter().fold(Tally::default(), |mut tally, entry| {
        let location = &entry.agent_context.previous_findings;
        if location.is_found() {
            tally.found += 1;
        }
        if location.confidence().needs_review() {
            tally.needs_review += 1;
        }
        tally
    })
}

fn print_summary(results: &[(RegistryEntry, Option<Verification>)]) {
    for (entry, verification) in results {
        let location = &entry.agent_context.previous_findings;
        let url = if location.is_found() {
            location.download_url().to_string()
        } else {
            "not found".dimmed().to_string()
        };
        let verdict = match verification {
            Some(v) if v.valid => " ✓".green().to_string(),
            Some(_) => " ✗".red().to_string(),
            None => String::new(),
        };
        println!(
            "{:<32} {:<6} {url}{verdict}",
            entry.id,
            paint_confidence(location.confidence())
        );
    }
    let Tally {
        found,
        needs_review,
    } = tally(results.iter().map(|(entry, _)| entry));
    println!("\nDiscovered {found} of {} specs", results.len());
    if needs_review > 0 {
        println!(
            "{}",
            format!("{needs_review} low-confidence result(s) need human review").yellow()
        );
    }
}
