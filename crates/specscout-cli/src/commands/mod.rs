//! Command implementations.

mod batch;
mod check;
mod discover;
mod serve;
mod verify;

pub use batch::{Manifest, Target, execute as batch};
pub use check::execute as check_source;
pub use discover::{DiscoverOptions, execute as discover};
pub use serve::execute as serve;
pub use verify::execute as verify_url;

use colored::Colorize;
use serde::Serialize;
use specscout_core::{Confidence, SpecDiscovery, SpecLocation, Verification};

/// A result with its optional verification attached.
#[derive(Serialize)]
pub struct Verified<'a, T: Serialize> {
    #[serde(flatten)]
    inner: &'a T,
    #[serde(skip_serializing_if = "Option::is_none")]
    verification: Option<&'a Verification>,
}

impl<'a, T: Serialize> Verified<'a, T> {
    const fn new(inner: &'a T, verification: Option<&'a Verification>) -> Self {
        Self {
            inner,
            verification,
        }
    }
}

/// Verify a found URL, but only when the analysis was confident enough.
async fn verify_if_actionable(
    discovery: &SpecDiscovery,
    location: &SpecLocation,
) -> Option<Verification> {
    if location.is_found() && location.confidence().is_actionable() {
        Some(discovery.inspect_spec_url(location.download_url()).await)
    } else {
        None
    }
}

fn paint_confidence(confidence: Confidence) -> colored::ColoredString {
    match confidence {
        Confidence::High => confidence.as_str().green(),
        Confidence::Medium => confidence.as_str().yellow(),
        Confidence::Low => confidence.as_str().red(),
    }
}

fn print_location(location: &SpecLocation) {
    if location.is_found() {
        println!("{} {}", "Download URL:".bold(), location.download_url());
    } else {
        println!("{} {}", "Download URL:".bold(), "not found".dimmed());
    }
    println!(
        "{} {}",
        "Version:".bold(),
        location.version().unwrap_or("will extract from spec")
    );
    println!("{} {}", "Format:".bold(), location.format());
    println!(
        "{} {}",
        "Versioning strategy:".bold(),
        location.versioning_strategy()
    );
    if let Some(info) = location.github_info() {
        println!(
            "{} {}/{} ({})",
            "GitHub:".bold(),
            info.owner(),
            info.repo(),
            info.path()
        );
    }
    println!(
        "{} {}",
        "Confidence:".bold(),
        paint_confidence(location.confidence())
    );
    if !location.reasoning().is_empty() {
        println!("{} {}", "Reasoning:".bold(), location.reasoning());
    }
}

fn print_verification(verification: &Verification) {
    let verdict = if verification.valid {
        format!("✓ {}", verification.message()).green()
    } else {
        format!("✗ {}", verification.message()).red()
    };
    println!("{} {verdict} ({})", "Verification:".bold(), verification.detail);
}
