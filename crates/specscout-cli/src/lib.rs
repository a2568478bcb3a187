//! specscout CLI - locate and verify vendor OpenAPI specifications
//!
//! Command implementations live in [`commands`]; the HTTP front door in
//! [`server`]. Everything here is wiring: configuration, the reasoning client,
//! and dispatch.
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use specscout_core::config::api_key_from_env;
use specscout_core::{AnthropicClient, Config, DiscoveryRequest, GithubInfo, SpecDiscovery};
use tracing::{debug, warn};

mod cli;
pub mod commands;
pub mod output;
pub mod server;
mod utils;

use cli::{Cli, Commands};
use utils::initialize_logging;

/// Execute the specscout CLI with the current environment.
///
/// # Errors
///
/// Returns an error if configuration, logging setup, or command execution fails.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    initialize_logging(&cli)?;

    let config = load_config(cli.config.as_deref())?;
    execute_command(cli.command, config).await
}

async fn execute_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Discover {
            vendor,
            api,
            documentation_url,
            hints,
            verify,
            registry,
            format,
        } => {
            let discovery = build_discovery(&config)?;
            let request = DiscoveryRequest::new(vendor, api, documentation_url).with_hints(hints);
            let options = commands::DiscoverOptions { verify, registry };
            commands::discover(&discovery, &request, options, format.resolve()).await?;
        },
        Commands::Verify { url, format } => {
            let discovery = build_discovery(&config)?;
            commands::verify_url(&discovery, &url, format.resolve()).await?;
        },
        Commands::Batch {
            manifest,
            concurrency,
            verify,
            format,
        } => {
            let discovery = build_discovery(&config)?;
            commands::batch(
                &discovery,
                &manifest,
                usize::from(concurrency),
                verify,
                format.resolve(),
            )
            .await?;
        },
        Commands::Check {
            vendor,
            api,
            documentation_url,
            owner,
            repo,
            path,
            hints,
            format,
        } => {
            let existing = GithubInfo::new(owner, repo, path)
                .context("--owner, --repo and --path must not be blank")?;
            let discovery = build_discovery(&config)?;
            let request = DiscoveryRequest::new(vendor, api, documentation_url).with_hints(hints);
            commands::check_source(&discovery, &request, &existing, format.resolve()).await?;
        },
        Commands::Serve { bind } => {
            let addr = bind.unwrap_or_else(|| config.server.bind.clone());
            let discovery = build_discovery(&config)?;
            commands::serve(&addr, discovery).await?;
        },
    }
    Ok(())
}

/// Load configuration from `explicit` if given, else from the default location.
fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let config = match explicit {
        Some(path) => {
            let mut config = Config::load_from(path)?;
            config.apply_env();
            config
        },
        None => Config::load()?,
    };
    debug!(bind = %config.server.bind, "Configuration loaded");
    Ok(config)
}

/// Build the discovery facade with the Anthropic client.
///
/// A missing API key is not fatal: every analysis then degrades to a
/// low-confidence result that names the authentication failure.
pub fn build_discovery(config: &Config) -> Result<SpecDiscovery> {
    let api_key = api_key_from_env().unwrap_or_else(|| {
        warn!("ANTHROPIC_API_KEY is not set; discovery results will be low confidence");
        String::new()
    });

    let client = AnthropicClient::new(&config.reasoning, api_key)
        .context("Failed to create reasoning client")?;
    debug!(model = client.model(), "Reasoning client ready");
    let discovery = SpecDiscovery::new(config, Arc::new(client))
        .context("Failed to create HTTP clients")?;
    Ok(discovery)
}
