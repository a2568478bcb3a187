//! `specscout serve`: run the HTTP front door.

use std::sync::Arc;

use anyhow::Result;
use specscout_core::SpecDiscovery;

/// Execute the serve command; returns after Ctrl-C.
pub async fn execute(addr: &str, discovery: SpecDiscovery) -> Result<()> {
    crate::server::serve(addr, Arc::new(discovery)).await
}
