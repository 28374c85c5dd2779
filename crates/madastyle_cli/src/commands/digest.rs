//! Digest command implementation

use std::path::PathBuf;

use madastyle_resources::ChecksumAlgorithm;
use miette::Result;
use tracing::debug;

/// Prints `<file>=<hex digest>` for every file, in argument order.
pub fn run_digest(algorithm: ChecksumAlgorithm, files: &[PathBuf]) -> Result<()> {
    for file in files {
        let bytes = std::fs::read(file)
            .map_err(|e| miette::miette!("Failed to read {}: {}", file.display(), e))?;
        debug!("Hashing {} ({} bytes) with {}", file.display(), bytes.len(), algorithm);
        println!("{}={}", file.display(), algorithm.compute(&bytes));
    }
    Ok(())
}
