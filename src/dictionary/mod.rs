// Dictionary API module.
// Provides the lookup client and raw response types for the remote dictionary source.

pub mod client;
pub mod types;

pub use client::{DEFAULT_API_BASE, DictionaryClient, LookupClient};
pub use types::*;
