// Logging setup.
// Routes tracing output to a file in the cache directory so it never draws over the TUI.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::cache::log_path;
use crate::error::{DictError, Result};

/// Install the global subscriber, appending to `{cache_dir}/pocketdict.log`.
/// A subscriber that is already installed is left in place.
pub fn init(cache_dir: &Path, filter: &str) -> Result<()> {
    fs::create_dir_all(cache_dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path(cache_dir))?;

    let filter = EnvFilter::try_new(filter)
        .map_err(|e| DictError::Config(format!("invalid log filter {:?}: {}", filter, e)))?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();

    Ok(())
}
