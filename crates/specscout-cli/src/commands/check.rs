//! `specscout check`: re-discover an existing connector and compare sources.
//!
//! ```bash
//! specscout check twilio twilio https://www.twilio.com/docs/openapi \
//!     --owner twilio --repo twilio-oai --path spec/json/twilio_api_v2010.json
//! ```

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use specscout_core::{
    DiscoveryRequest, GithubInfo, SourceCheck, SpecDiscovery, SpecLocation, compare_github_source,
};

use super::print_location;
use crate::output::{OutputFormat, print_json};

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum Status {
    Confirmed,
    Different,
    NoRepository,
}

#[derive(Serialize)]
struct CheckReport<'a> {
    status: Status,
    existing: &'a GithubInfo,
    found: Option<&'a GithubInfo>,
    location: &'a SpecLocation,
}

/// Execute the check command.
pub async fn execute(
    discovery: &SpecDiscovery,
    request: &DiscoveryRequest,
    existing: &GithubInfo,
    format: OutputFormat,
) -> Result<()> {
    let location = discovery.discover_spec(request).await;
    let check = compare_github_source(existing, &location);

    match format {
        OutputFormat::Json => {
            let status = match check {
                SourceCheck::Confirmed => Status::Confirmed,
                SourceCheck::Different(_) => Status::Different,
                SourceCheck::NoRepository => Status::NoRepository,
            };
            print_json(&CheckReport {
                status,
                existing,
                found: location.github_info(),
                location: &location,
            })?;
        },
        OutputFormat::Text => {
            println!(
                "Current source: {}/{}",
                existing.owner(),
                existing.repo()
            );
            print_location(&location);
            println!();
            match check {
                SourceCheck::Confirmed => {
                    println!("{}", "Verified: discovery confirms the current source".green());
                },
                SourceCheck::Different(found) => {
                    println!("{}", "Alert: discovery found a different source".yellow());
                    println!("Consider updating to: {}/{}", found.owner(), found.repo());
                },
                SourceCheck::NoRepository => {
                    println!(
                        "{}",
                        "Discovery did not identify a repository; compare the download URL manually"
                            .dimmed()
                    );
                },
            }
        },
    }
    Ok(())
}
