// Cache module for local word storage.
// Keeps looked-up words on disk for offline reuse and recent history.

pub mod paths;
pub mod store;

pub use paths::{default_cache_dir, log_path};
pub use store::{CacheStore, FileStore};
