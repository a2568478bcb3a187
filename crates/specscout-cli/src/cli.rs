//! # CLI Structure and Argument Parsing
//!
//! The CLI follows a command-subcommand pattern:
//!
//! - **Global options**: `--verbose`, `--quiet`, `--no-color`, `--config`
//! - **Subcommands**: `discover`, `verify`, `batch`, `check`, `serve`
//!
//! ```bash
//! # Find a spec from a documentation page
//! specscout discover acme widgets https://docs.acme.dev/api --hint "Check GitHub"
//!
//! # Confirm a URL serves a spec
//! specscout verify https://raw.githubusercontent.com/acme/widgets-oai/main/openapi.yaml
//!
//! # Registry entries for many vendors
//! specscout batch targets.toml --concurrency 4 > registry.json
//!
//! # Run the HTTP front door
//! specscout serve --bind 127.0.0.1:8000
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::output::FormatArg;

/// Main CLI structure for the `specscout` command
#[derive(Parser, Clone, Debug)]
#[command(name = "specscout")]
#[command(version)]
#[command(about = "specscout - Locate and verify vendor OpenAPI specifications", long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress informational messages (only show errors)
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable all ANSI colors in output (also respects `NO_COLOR` env)
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Available subcommands
#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Find where a vendor publishes its OpenAPI specification
    Discover {
        /// Vendor name (e.g. `salesforce`)
        vendor: String,

        /// API name within the vendor (e.g. `marketing-cloud`)
        api: String,

        /// Documentation page to start from
        documentation_url: String,

        /// Hint for the reasoning service (repeatable)
        #[arg(long = "hint", value_name = "TEXT")]
        hints: Vec<String>,

        /// Verify the discovered URL when confidence is high or medium
        #[arg(long)]
        verify: bool,

        /// Print a connector-registry entry instead of the raw result
        #[arg(long)]
        registry: bool,

        #[command(flatten)]
        format: FormatArg,
    },

    /// Check whether a URL serves an OpenAPI or Swagger document
    Verify {
        /// Candidate spec URL
        url: String,

        #[command(flatten)]
        format: FormatArg,
    },

    /// Discover many targets from a manifest and print registry entries
    Batch {
        /// Manifest file (`.json` or `.toml`)
        manifest: PathBuf,

        /// Maximum discoveries in flight
        #[arg(long, short = 'j', default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..=64))]
        concurrency: u16,

        /// Verify each discovered URL when confidence is high or medium
        #[arg(long)]
        verify: bool,

        #[command(flatten)]
        format: FormatArg,
    },

    /// Re-discover an existing connector and compare against its known repository
    Check {
        /// Vendor name
        vendor: String,

        /// API name within the vendor
        api: String,

        /// Documentation page to start from
        documentation_url: String,

        /// Owner of the repository currently used
        #[arg(long)]
        owner: String,

        /// Repository currently used
        #[arg(long)]
        repo: String,

        /// Spec path inside the repository
        #[arg(long, default_value = "openapi.yaml")]
        path: String,

        /// Hint for the reasoning service (repeatable)
        #[arg(long = "hint", value_name = "TEXT")]
        hints: Vec<String>,

        #[command(flatten)]
        format: FormatArg,
    },

    /// Run the HTTP front door
    Serve {
        /// Socket address to listen on (overrides configuration)
        #[arg(long, value_name = "ADDR")]
        bind: Option<String>,
    },
}

impl Commands {
    /// The output format this command will print in, if it prints one.
    pub fn output_format(&self) -> Option<crate::output::OutputFormat> {
        match self {
            Self::Discover { format, .. }
            | Self::Verify { format, .. }
            | Self::Batch { format, .. }
            | Self::Check { format, .. } => Some(format.resolve()),
            Self::Serve { .. } => None,
        }
    }
}
