//! Resource command implementation

use miette::{IntoDiagnostic, Result};

use crate::cli::Cli;
use crate::utils::open_cache;

pub fn run_resource(cli: &Cli, logical_path: &str) -> Result<()> {
    let cache = open_cache(cli)?;
    let path = cache
        .local_file_for_bundled_resource(logical_path)
        .into_diagnostic()?;

    println!("{}", path.display());
    Ok(())
}
