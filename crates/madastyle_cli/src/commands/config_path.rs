//! Config-path command implementation

use miette::{IntoDiagnostic, Result};
use tracing::warn;

use crate::cli::Cli;
use crate::utils::{create_tokio_runtime, open_cache};

pub fn run_config_path(cli: &Cli, location: &str) -> Result<()> {
    let cache = open_cache(cli)?;
    let cancel = cache.fetcher().http().cancellation_token().clone();

    let runtime = create_tokio_runtime()?;
    let path = runtime.block_on(async {
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, cancelling download");
                cancel.cancel();
            }
        });
        cache.local_file_for_config_path(location).await
    });

    println!("{}", path.into_diagnostic()?.display());
    Ok(())
}
