//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use featuregate::api::{self, BuildResponse, FlagStateResponse, FlagsResponse};
use featuregate::build_info::BuildInfo;
use featuregate::config::ConfigDocument;
use featuregate_core::{DeprecationValidator, FlagCategory, FlagError, FlagRegistry};
use std::path::Path;
use std::sync::Arc;

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), FlagError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| FlagError::SerializationError(e.to_string()))?;
    println!("{}", json);
    Ok(())
}

// =============================================================================
// LIST COMMAND
// =============================================================================

/// Dump the classification, optionally for one category.
pub fn cmd_list(
    registry: &FlagRegistry,
    json_mode: bool,
    verbose: bool,
    category: Option<&str>,
) -> Result<(), FlagError> {
    let categories: Vec<FlagCategory> = match category {
        Some(c) => vec![c.parse()?],
        None => FlagCategory::ALL.to_vec(),
    };

    if json_mode {
        if category.is_none() {
            print_json(&FlagsResponse::new(registry, BuildInfo::current()))?;
        } else {
            let output: serde_json::Map<String, serde_json::Value> = categories
                .iter()
                .map(|c| {
                    let names: Vec<&str> = registry.iter(*c).map(|n| n.as_str()).collect();
                    (c.as_str().to_string(), serde_json::json!(names))
                })
                .collect();
            print_json(&output)?;
        }
        return Ok(());
    }

    println!("featuregate Flags");
    println!("=================");

    for c in categories {
        println!();
        println!("{} ({})", c, registry.count(c));
        for name in registry.iter(c) {
            if verbose {
                println!("  {:<10} {}", format!("{:?}", name.namespace()), name);
            } else {
                println!("  {}", name);
            }
        }
    }

    Ok(())
}

// =============================================================================
// CHECK COMMAND
// =============================================================================

/// Show the state of one flag.
pub fn cmd_check(registry: &FlagRegistry, json_mode: bool, name: &str) -> Result<(), FlagError> {
    let response = FlagStateResponse::new(registry, name);

    if json_mode {
        return print_json(&response);
    }

    println!("Flag:       {}", response.name);
    println!("State:      {}", response.state);
    println!("Namespace:  {:?}", response.namespace);
    println!("Active:     {}", response.active);
    println!("Enabled:    {}", response.enabled);
    println!("Disallowed: {}", response.disallowed);

    Ok(())
}

// =============================================================================
// VALIDATE COMMAND
// =============================================================================

/// Check a configuration file for deprecated options.
///
/// Deprecated options are logged as warnings. A disallowed option fails the
/// command with the option's flag name.
pub fn cmd_validate(
    registry: &FlagRegistry,
    json_mode: bool,
    file: &Path,
) -> Result<(), FlagError> {
    tracing::info!("Validating {:?}", file);

    let document = ConfigDocument::load(file)?;
    let validator = DeprecationValidator::new(registry);
    let report = document.validate(&validator).inspect_err(|e| {
        tracing::error!(event = "config_rejected", file = %file.display(), "{}", e);
    })?;

    if json_mode {
        return print_json(&serde_json::json!({
            "file": file.to_string_lossy(),
            "valid": true,
            "checked": report.checked,
            "warnings": report.warnings,
        }));
    }

    println!("Configuration: {}", file.display());
    println!("Checked:       {} options", report.checked);
    if report.is_clean() {
        println!("Result:        OK (no deprecated options)");
    } else {
        println!(
            "Result:        OK with {} deprecated option(s)",
            report.warnings.len()
        );
        for name in &report.warnings {
            println!("  - {}", name);
        }
    }

    Ok(())
}

// =============================================================================
// VERSION COMMAND
// =============================================================================

/// Show build metadata.
pub fn cmd_version(json_mode: bool) -> Result<(), FlagError> {
    let build = BuildInfo::current();

    if json_mode {
        return print_json(&BuildResponse::from(&build));
    }

    println!("Version: {}", build.version());
    for (key, value) in build.metadata() {
        println!("  {:<16} {}", key, value);
    }

    Ok(())
}

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Start the introspection server.
pub async fn cmd_server(
    registry: Arc<FlagRegistry>,
    host: &str,
    port: u16,
) -> Result<(), FlagError> {
    println!("featuregate Introspection Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:     {}", host);
    println!("  Port:     {}", port);
    println!("  Flags:    {}", registry.snapshot().total());
    println!();
    println!("Endpoints:");
    println!("  GET  /health       - Health check");
    println!("  GET  /flags        - Full classification");
    println!("  GET  /flags/{{name}} - State of one flag");
    println!("  GET  /build        - Build metadata");
    println!("  POST /validate     - Check a TOML configuration");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    let addr = format!("{}:{}", host, port);
    api::run_server(&addr, registry).await
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct Unserializable;

    impl serde::Serialize for Unserializable {
        fn serialize<S: serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("not representable"))
        }
    }

    #[test]
    fn print_json_reports_serialization_failure() {
        assert!(matches!(
            print_json(&Unserializable),
            Err(FlagError::SerializationError(ref msg)) if msg.contains("not representable")
        ));
    }

    #[test]
    fn print_json_accepts_api_types() {
        let registry = FlagRegistry::from_lists(["A"], ["B"], ["C"]).expect("build");
        assert!(print_json(&FlagStateResponse::new(&registry, "A")).is_ok());
    }
}
