//! Configuration for hexpanel
//!
//! Provides types and loading for the optional `hexpanel.toml` file.

pub mod loader;
pub mod schema;

pub use loader::{
    check_config, find_config, find_config_from, load_config, merge_cli_overrides, project_root,
    resolve_path, CliOverrides, ConfigError,
};
pub use schema::*;
