//! # featuregate
//!
//! Library half of the featuregate binary: everything the CLI and the
//! integration tests share.
//!
//! - [`api`]: read-only introspection server (axum)
//! - [`config`]: TOML configuration validation against the deprecation gates
//! - [`build_info`]: compiled-in version metadata

pub mod api;
pub mod build_info;
pub mod config;
