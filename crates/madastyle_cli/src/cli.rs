//! CLI argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use madastyle_resources::ChecksumAlgorithm;

/// Madastyle - local cache for bundled and remote configuration resources
#[derive(Parser)]
#[command(name = "madastyle")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Cache root directory (overrides `cacheRoot` from the config file)
    #[arg(long, global = true, env = "MADASTYLE_HOME")]
    pub root: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the local file of a bundled resource, extracting it if needed
    Resource {
        /// Logical path, e.g. `checkstyle/checkstyle-mada.xml`
        logical_path: String,
    },

    /// Print the local file for a configuration path or URL
    ConfigPath {
        /// Local path or http(s) URL
        location: String,
    },

    /// List the bundled checksum index
    Checksums,

    /// Print properties-style digests of files
    Digest {
        /// Hash algorithm (sha256, sha512)
        #[arg(short, long, default_value_t = ChecksumAlgorithm::Sha256)]
        algorithm: ChecksumAlgorithm,

        /// Files to hash
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}
