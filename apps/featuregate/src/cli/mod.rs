//! # featuregate CLI Module
//!
//! This module implements the CLI interface for featuregate.
//!
//! ## Available Commands
//!
//! - `list` - Dump the flag classification (default)
//! - `check` - Show the state of one flag
//! - `validate` - Check a TOML configuration for deprecated options
//! - `version` - Show build metadata
//! - `server` - Start the read-only introspection server

mod commands;

use clap::{Parser, Subcommand};
use featuregate_core::{FlagError, FlagRegistry};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// featuregate - runtime feature flag and deprecation gate inspector
///
/// Flags are enabled, disabled, or disallowed by the roster compiled into
/// this binary. Anything else is off.
#[derive(Parser, Debug)]
#[command(name = "featuregate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List flags by category
    List {
        /// Only this category (enabled, disabled, disallowed)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Show the state of a single flag
    Check {
        /// Full flag name, e.g. envoy.reloadable_features.strict_header_validation
        name: String,
    },

    /// Check a TOML configuration for deprecated options
    Validate {
        /// Path to the configuration file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Show build metadata
    Version,

    /// Start the read-only introspection server
    Server {
        /// Host to bind to
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "9901")]
        port: u16,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
///
/// The registry is built once here; a roster conflict aborts before any
/// command runs.
pub async fn execute(cli: Cli) -> Result<(), FlagError> {
    let registry = FlagRegistry::shared()?;
    tracing::debug!(
        enabled = registry.count(featuregate_core::FlagCategory::Enabled),
        disabled = registry.count(featuregate_core::FlagCategory::Disabled),
        disallowed = registry.count(featuregate_core::FlagCategory::Disallowed),
        "Flag registry ready"
    );

    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::List { category }) => {
            cmd_list(&registry, json_mode, cli.verbose, category.as_deref())
        }
        Some(Commands::Check { name }) => cmd_check(&registry, json_mode, &name),
        Some(Commands::Validate { file }) => cmd_validate(&registry, json_mode, &file),
        Some(Commands::Version) => cmd_version(json_mode),
        Some(Commands::Server { host, port }) => cmd_server(registry, &host, port).await,
        None => cmd_list(&registry, json_mode, cli.verbose, None),
    }
}
