// Word resolution service.
// Answers lookups cache-first, writes remote results back, and publishes recent history.

use std::sync::Arc;

use tokio::sync::{Mutex, mpsc, watch};
use tracing::{debug, info, warn};

use crate::cache::CacheStore;
use crate::dictionary::LookupClient;
use crate::error::{DictError, Result};
use crate::word::{WordRecord, normalize_headword};

/// One step of a lookup. Every lookup yields `Loading` and then exactly
/// one of `Success` or `Error`.
#[derive(Debug)]
pub enum Resolution {
    Loading,
    Success(WordRecord),
    Error(DictError),
}

impl Resolution {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Resolution::Loading)
    }
}

/// Cache-first resolver shared across the application.
#[derive(Clone)]
pub struct ResolutionService {
    store: Arc<dyn CacheStore>,
    client: Arc<dyn LookupClient>,
    recent_limit: usize,
    recent_tx: Arc<watch::Sender<Vec<WordRecord>>>,
    /// Held across a store mutation and its publish so observers see them in order.
    write_lock: Arc<Mutex<()>>,
}

impl ResolutionService {
    /// Build the service and seed the recent words view from the store.
    pub async fn new(
        store: Arc<dyn CacheStore>,
        client: Arc<dyn LookupClient>,
        recent_limit: usize,
    ) -> Result<Self> {
        let initial = store.recent(recent_limit).await?;
        let (recent_tx, _) = watch::channel(initial);

        Ok(Self {
            store,
            client,
            recent_limit,
            recent_tx: Arc::new(recent_tx),
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    /// Start a lookup on the runtime and return its result stream.
    pub fn resolve(&self, word: &str) -> mpsc::UnboundedReceiver<Resolution> {
        let (tx, rx) = mpsc::unbounded_channel();
        let service = self.clone();
        let word = word.to_string();

        tokio::spawn(async move {
            service
                .lookup(&word, |step| {
                    // Receiver gone means the caller stopped listening.
                    let _ = tx.send(step);
                })
                .await;
        });

        rx
    }

    /// Run a lookup to completion, passing each step to `emit`.
    pub async fn lookup<F>(&self, word: &str, mut emit: F)
    where
        F: FnMut(Resolution) + Send,
    {
        emit(Resolution::Loading);

        let result = match normalize_headword(word) {
            Some(headword) => self.resolve_headword(&headword).await,
            None => Err(DictError::EmptyQuery),
        };

        emit(match result {
            Ok(record) => Resolution::Success(record),
            Err(e) => {
                if e.is_validation() {
                    debug!("ignoring blank query");
                } else if e.is_not_found() {
                    info!(word, "no definitions found");
                } else {
                    warn!(word, error = %e, "lookup failed");
                }
                Resolution::Error(e)
            }
        });
    }

    async fn resolve_headword(&self, headword: &str) -> Result<WordRecord> {
        match self.store.get(headword).await {
            Ok(Some(record)) => {
                debug!(headword, "cache hit");
                return Ok(record);
            }
            Ok(None) => debug!(headword, "cache miss"),
            Err(e) => warn!(headword, error = %e, "cache read failed, treating as miss"),
        }

        let entries = self.client.fetch(headword).await?;
        // Only the first entry is used when the source splits senses across entries.
        let Some(entry) = entries.into_iter().next() else {
            return Err(DictError::NotFound(headword.to_string()));
        };

        let record = WordRecord::from_entry(headword, entry);
        let _guard = self.write_lock.lock().await;
        match self.store.put(&record).await {
            Ok(()) => {
                info!(headword, "cached dictionary entry");
                self.publish_recent().await;
            }
            Err(e) => warn!(headword, error = %e, "failed to cache dictionary entry"),
        }

        Ok(record)
    }

    /// Live view of the most recently cached words, newest first.
    pub fn recent_words(&self) -> watch::Receiver<Vec<WordRecord>> {
        self.recent_tx.subscribe()
    }

    /// Remove a word from history. Unknown words are ignored.
    pub async fn delete_word(&self, word: &str) -> Result<()> {
        let Some(headword) = normalize_headword(word) else {
            return Ok(());
        };
        let _guard = self.write_lock.lock().await;
        self.store.delete(&headword).await?;
        info!(%headword, "deleted word from history");
        self.publish_recent().await;
        Ok(())
    }

    /// Remove all cached words.
    pub async fn clear_history(&self) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.store.clear().await?;
        info!("cleared history");
        self.publish_recent().await;
        Ok(())
    }

    /// Re-query the store and push the list to every observer.
    /// Callers hold `write_lock`.
    async fn publish_recent(&self) {
        match self.store.recent(self.recent_limit).await {
            Ok(words) => {
                self.recent_tx.send_replace(words);
            }
            Err(e) => warn!(error = %e, "failed to refresh recent words"),
        }
    }
}
