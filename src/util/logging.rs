use anyhow::Result;
use env_logger::{Builder, Env};

/// Initialize the logging system with env_logger.
///
/// `RUST_LOG` takes precedence when set. Otherwise the `verbose` flag
/// selects between debug and info output for this crate.
pub fn init_logging(verbose: bool) -> Result<()> {
    let default_filter = default_filter(verbose);
    Builder::from_env(Env::default().default_filter_or(default_filter))
        .format_target(true)
        .try_init()?;
    Ok(())
}

fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "beatmarch=debug,warn"
    } else {
        "beatmarch=info,warn"
    }
}
