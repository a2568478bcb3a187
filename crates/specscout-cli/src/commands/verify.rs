//! `specscout verify`: check that a URL serves a specification.

use anyhow::Result;
use serde::Serialize;
use specscout_core::{SpecDiscovery, Verification};

use super::print_verification;
use crate::output::{OutputFormat, print_json};

#[derive(Serialize)]
struct VerifyReport<'a> {
    url: &'a str,
    valid: bool,
    status: Option<u16>,
    message: &'static str,
    detail: &'a str,
}

impl<'a> VerifyReport<'a> {
    fn new(url: &'a str, verification: &'a Verification) -> Self {
        Self {
            url,
            valid: verification.valid,
            status: verification.status,
            message: verification.message(),
            detail: &verification.detail,
        }
    }
}

/// Execute the verify command.
pub async fn execute(discovery: &SpecDiscovery, url: &str, format: OutputFormat) -> Result<()> {
    let verification = discovery.inspect_spec_url(url).await;

    match format {
        OutputFormat::Json => print_json(&VerifyReport::new(url, &verification))?,
        OutputFormat::Text => {
            println!("URL: {url}");
            if let Some(status) = verification.status {
                println!("Status: {status}");
            }
            print_verification(&verification);
        },
    }
    Ok(())
}
