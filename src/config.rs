// Runtime configuration.
// Reads endpoint, cache location, timeouts, and log filter from the environment.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::default_cache_dir;
use crate::dictionary::DEFAULT_API_BASE;
use crate::error::{DictError, Result};

pub const DEFAULT_RECENT_LIMIT: usize = 10;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_LOG_FILTER: &str = "pocketdict=info";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Dictionary endpoint; the headword is appended as a path segment.
    pub api_base: String,
    pub cache_dir: PathBuf,
    pub request_timeout: Duration,
    /// Size of the recent words list.
    pub recent_limit: usize,
    /// `tracing` filter directive.
    pub log_filter: String,
}

impl Config {
    /// Load configuration from `POCKETDICT_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let cache_dir = match var("POCKETDICT_CACHE_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => default_cache_dir().ok_or_else(|| {
                DictError::Config(
                    "no home directory found; set POCKETDICT_CACHE_DIR".to_string(),
                )
            })?,
        };

        let request_timeout = match var("POCKETDICT_TIMEOUT_SECS") {
            Some(v) => Duration::from_secs(parse_number("POCKETDICT_TIMEOUT_SECS", &v)?),
            None => DEFAULT_TIMEOUT,
        };

        let recent_limit = match var("POCKETDICT_RECENT_LIMIT") {
            Some(v) => parse_number("POCKETDICT_RECENT_LIMIT", &v)?,
            None => DEFAULT_RECENT_LIMIT,
        };

        Ok(Self {
            api_base: var("POCKETDICT_API_URL").unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            cache_dir,
            request_timeout,
            recent_limit,
            log_filter: var("POCKETDICT_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        })
    }
}

fn parse_number<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| DictError::Config(format!("{} must be a number, got {:?}", key, value)))
}
