// pocketdict: terminal dictionary with cache-first lookups.
// Wires configuration, logging, the cache store, and the API client into the TUI.

mod app;
mod cache;
mod config;
mod dictionary;
mod error;
mod logging;
mod service;
mod state;
mod ui;
mod word;

use std::sync::Arc;

use tracing::info;

use crate::app::App;
use crate::cache::FileStore;
use crate::config::Config;
use crate::dictionary::DictionaryClient;
use crate::error::Result;
use crate::service::ResolutionService;

fn main() -> Result<()> {
    let config = Config::from_env()?;
    logging::init(&config.cache_dir, &config.log_filter)?;

    let runtime = tokio::runtime::Runtime::new()?;
    let store = Arc::new(FileStore::open(&config.cache_dir)?);
    let client = Arc::new(DictionaryClient::new(
        &config.api_base,
        config.request_timeout,
    )?);
    info!(
        api = %config.api_base,
        cache_dir = %store.cache_dir().display(),
        "starting pocketdict"
    );

    let service = runtime.block_on(ResolutionService::new(store, client, config.recent_limit))?;

    let mut terminal = ratatui::init();
    let mut app = App::new(service, runtime.handle().clone());
    let result = app.run(&mut terminal);
    ratatui::restore();

    result?;
    info!("exiting");
    Ok(())
}
