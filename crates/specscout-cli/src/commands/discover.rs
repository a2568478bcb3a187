//! `specscout discover`: locate one vendor's specification.

use anyhow::Result;
use specscout_core::{DiscoveryRequest, RegistryEntry, SpecDiscovery};

use super::{Verified, print_location, print_verification, verify_if_actionable};
use crate::output::{OutputFormat, print_json};

/// Switches for `discover`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscoverOptions {
    /// Verify the result when confidence allows.
    pub verify: bool,
    /// Print a registry entry instead of the bare result.
    pub registry: bool,
}

/// Execute the discover command.
pub async fn execute(
    discovery: &SpecDiscovery,
    request: &DiscoveryRequest,
    options: DiscoverOptions,
    format: OutputFormat,
) -> Result<()> {
    let location = discovery.discover_spec(request).await;
    let verification = if options.verify {
        verify_if_actionable(discovery, &location).await
    } else {
        None
    };

    if options.registry {
        let entry = RegistryEntry::from_discovery(
            &request.vendor,
            &request.api_name,
            &location,
            &request.documentation_url,
        );
        match format {
            OutputFormat::Json => print_json(&Verified::new(&entry, verification.as_ref()))?,
            OutputFormat::Text => {
                println!("{} ({})", entry.name, entry.id);
                println!("Connector repo: {}", entry.connector_repo);
                print_location(&location);
            },
        }
    } else {
        match format {
            OutputFormat::Json => print_json(&Verified::new(&location, verification.as_ref()))?,
            OutputFormat::Text => print_location(&location),
        }
    }

    if format == OutputFormat::Text {
        match &verification {
            Some(verification) => print_verification(verification),
            None if options.verify => {
                println!("Verification: skipped (no URL or low confidence)");
            },
            None => {},
        }
    }

    Ok(())
}
