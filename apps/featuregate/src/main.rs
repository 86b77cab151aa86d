//! # featuregate
//!
//! The main binary for the featuregate flag registry.
//!
//! This application provides:
//! - CLI interface for inspecting the compiled-in flag roster
//! - Configuration validation against the deprecation gates
//! - A read-only HTTP introspection server (axum-based)
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │              apps/featuregate (THE BINARY)           │
//! │                                                      │
//! │   ┌─────────────┐   ┌──────────────┐   ┌──────────┐  │
//! │   │    CLI      │   │ Introspection│   │  Config  │  │
//! │   │   (clap)    │   │  API (axum)  │   │ validate │  │
//! │   └──────┬──────┘   └──────┬───────┘   └────┬─────┘  │
//! │          └─────────────────┼────────────────┘        │
//! │                            ▼                         │
//! │                 ┌──────────────────────┐             │
//! │                 │   featuregate-core   │             │
//! │                 │ Arc<FlagRegistry>    │             │
//! │                 └──────────────────────┘             │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! featuregate list --category disallowed
//! featuregate check envoy.reloadable_features.strict_header_validation
//! featuregate validate -f edge.toml
//! featuregate server --host 0.0.0.0 --port 9901
//! ```

mod cli;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // FEATUREGATE_LOG_FORMAT=json enables machine-parseable output.
    let log_format =
        std::env::var("FEATUREGATE_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "featuregate=info,tower_http=debug".into());

    // Logs go to stderr so `--json-mode` output on stdout stays parseable.
    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    let cli = cli::Cli::parse();

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the startup banner.
fn print_banner() {
    println!(
        r#"
  featuregate v{}
  enabled | disabled | disallowed - unknown means off
"#,
        env!("CARGO_PKG_VERSION")
    );
}
