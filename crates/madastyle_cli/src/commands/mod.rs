//! Subcommand implementations

pub mod checksums;
pub mod config_path;
pub mod digest;
pub mod resource;
