// Cache store for word records.
// Persists one JSON row per headword with atomic writes and serves recent history.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::{DictError, Result};
use crate::word::{Meaning, WordRecord};

use super::paths;

/// Durable keyed storage for word records.
///
/// Keys are exact: callers pass already-normalized headwords.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Look up a record by headword.
    async fn get(&self, headword: &str) -> Result<Option<WordRecord>>;

    /// Insert or fully replace the record for its headword, stamping the write time.
    async fn put(&self, record: &WordRecord) -> Result<()>;

    /// Most recently written records first, at most `limit`.
    async fn recent(&self, limit: usize) -> Result<Vec<WordRecord>>;

    /// Remove a record. Absent headwords are a no-op.
    async fn delete(&self, headword: &str) -> Result<()>;

    /// Remove all records.
    async fn clear(&self) -> Result<()>;
}

/// On-disk row layout. `meanings` is kept as a serialized JSON blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordRow {
    pub word: String,
    pub phonetic: Option<String>,
    pub meanings: String,
    pub origin: Option<String>,
    /// Write time in epoch milliseconds.
    pub timestamp: i64,
}

impl WordRow {
    /// Encode a record for storage with the given write timestamp.
    pub fn encode(record: &WordRecord, timestamp: i64) -> Result<Self> {
        Ok(Self {
            word: record.headword.clone(),
            phonetic: record.phonetic.clone(),
            meanings: serde_json::to_string(&record.meanings)?,
            origin: record.origin.clone(),
            timestamp,
        })
    }

    /// Decode a stored row. An unreadable meanings blob yields no meanings.
    pub fn decode(self) -> WordRecord {
        let meanings: Vec<Meaning> = match serde_json::from_str(&self.meanings) {
            Ok(meanings) => meanings,
            Err(e) => {
                warn!(word = %self.word, error = %e, "discarding unreadable meanings");
                Vec::new()
            }
        };

        WordRecord {
            headword: self.word,
            phonetic: self.phonetic,
            meanings,
            origin: self.origin,
            cached_at: DateTime::<Utc>::from_timestamp_millis(self.timestamp),
        }
    }
}

/// Filesystem-backed cache store under `{cache_dir}/words`.
pub struct FileStore {
    cache_dir: PathBuf,
    last_stamp: Mutex<i64>,
}

impl FileStore {
    /// Open the store, creating its directory if needed.
    pub fn open(cache_dir: impl Into<PathBuf>) -> Result<Self> {
        let cache_dir = cache_dir.into();
        fs::create_dir_all(paths::words_dir(&cache_dir))?;
        Ok(Self {
            cache_dir,
            last_stamp: Mutex::new(0),
        })
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Current time in millis, forced strictly past the previous write.
    fn next_stamp(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let mut last = self.last_stamp.lock().unwrap_or_else(|e| e.into_inner());
        let stamp = now.max(*last + 1);
        *last = stamp;
        stamp
    }
}

/// Run filesystem work on the blocking pool.
async fn blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| DictError::Other(format!("cache task failed: {}", e)))?
}

#[async_trait]
impl CacheStore for FileStore {
    async fn get(&self, headword: &str) -> Result<Option<WordRecord>> {
        let path = paths::word_path(&self.cache_dir, headword);

        blocking(move || Ok(read_row(&path)?.map(WordRow::decode))).await
    }

    async fn put(&self, record: &WordRecord) -> Result<()> {
        let path = paths::word_path(&self.cache_dir, &record.headword);
        let row = WordRow::encode(record, self.next_stamp())?;
        debug!(word = %row.word, timestamp = row.timestamp, "writing cache row");

        blocking(move || write_row(&path, &row)).await
    }

    async fn recent(&self, limit: usize) -> Result<Vec<WordRecord>> {
        let dir = paths::words_dir(&self.cache_dir);

        blocking(move || {
            let mut rows = list_rows(&dir)?;
            rows.sort_by(|a, b| {
                b.timestamp
                    .cmp(&a.timestamp)
                    .then_with(|| a.word.cmp(&b.word))
            });
            rows.truncate(limit);
            Ok(rows.into_iter().map(WordRow::decode).collect())
        })
        .await
    }

    async fn delete(&self, headword: &str) -> Result<()> {
        let path = paths::word_path(&self.cache_dir, headword);

        blocking(move || delete_file(&path)).await
    }

    async fn clear(&self) -> Result<()> {
        let dir = paths::words_dir(&self.cache_dir);

        blocking(move || {
            delete_dir(&dir)?;
            fs::create_dir_all(&dir)?;
            Ok(())
        })
        .await
    }
}

/// Read a row file, returning None if it does not exist.
fn read_row(path: &Path) -> Result<Option<WordRow>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path)?;
    let row: WordRow = serde_json::from_str(&contents)?;
    Ok(Some(row))
}

/// Write a row as JSON atomically via a uniquely named temp file.
fn write_row(path: &Path, row: &WordRow) -> Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| DictError::Other(format!("no parent for {}", path.display())))?;
    fs::create_dir_all(parent)?;

    let json = serde_json::to_string_pretty(row)?;

    // Concurrent writers of one headword each get their own temp file.
    let mut temp = NamedTempFile::new_in(parent)?;
    temp.write_all(json.as_bytes())?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;

    Ok(())
}

/// Load every readable row in the words directory.
fn list_rows(dir: &Path) -> Result<Vec<WordRow>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut rows = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        match read_row(&path) {
            Ok(Some(row)) => rows.push(row),
            Ok(None) => {}
            Err(e) => warn!(path = %path.display(), error = %e, "skipping unreadable cache row"),
        }
    }
    Ok(rows)
}

/// Delete a file if present.
fn delete_file(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path)?;
    }
    Ok(())
}

/// Delete a directory and all contents if present.
fn delete_dir(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_dir_all(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::word::Definition;
    use tempfile::TempDir;

    fn record(headword: &str) -> WordRecord {
        WordRecord {
            headword: headword.to_string(),
            phonetic: Some(format!("/{}/", headword)),
            meanings: vec![Meaning {
                part_of_speech: "noun".to_string(),
                definitions: vec![Definition {
                    text: format!("The word {}", headword),
                    example: Some(format!("Say {}", headword)),
                }],
                synonyms: vec!["alias".to_string()],
                antonyms: Vec::new(),
            }],
            origin: Some("Old English".to_string()),
            cached_at: None,
        }
    }

    fn open() -> (TempDir, FileStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::open(temp_dir.path()).unwrap();
        (temp_dir, store)
    }

    #[tokio::test]
    async fn test_put_and_get_round_trip() {
        let (_dir, store) = open();
        let original = record("hello");

        store.put(&original).await.unwrap();
        let read = store.get("hello").await.unwrap().unwrap();

        assert!(read.same_entry(&original));
        assert!(read.cached_at.is_some());
    }

    #[tokio::test]
    async fn test_get_missing() {
        let (_dir, store) = open();
        assert!(store.get("absent").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_is_exact_key() {
        let (_dir, store) = open();
        store.put(&record("hello")).await.unwrap();

        assert!(store.get("Hello").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_replaces_existing() {
        let (_dir, store) = open();
        store.put(&record("hello")).await.unwrap();
        let first = store.get("hello").await.unwrap().unwrap();

        let mut updated = record("hello");
        updated.origin = None;
        store.put(&updated).await.unwrap();

        let second = store.get("hello").await.unwrap().unwrap();
        assert!(second.origin.is_none());
        assert!(second.cached_at > first.cached_at);
        assert_eq!(store.recent(10).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_recent_orders_newest_first_and_limits() {
        let (_dir, store) = open();
        for word in ["alpha", "beta", "gamma", "delta"] {
            store.put(&record(word)).await.unwrap();
        }
        // Rewriting moves a word back to the front.
        store.put(&record("alpha")).await.unwrap();

        let recent = store.recent(3).await.unwrap();
        let words: Vec<&str> = recent.iter().map(|r| r.headword.as_str()).collect();
        assert_eq!(words, vec!["alpha", "delta", "gamma"]);

        let stamps: Vec<_> = recent.iter().map(|r| r.cached_at.unwrap()).collect();
        assert!(stamps.windows(2).all(|w| w[0] > w[1]));
    }

    #[tokio::test]
    async fn test_delete_absent_is_noop() {
        let (_dir, store) = open();
        store.put(&record("keep")).await.unwrap();

        store.delete("missing").await.unwrap();

        assert_eq!(store.recent(10).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_removes_record() {
        let (_dir, store) = open();
        store.put(&record("gone")).await.unwrap();
        store.put(&record("kept")).await.unwrap();

        store.delete("gone").await.unwrap();

        assert!(store.get("gone").await.unwrap().is_none());
        assert!(store.get("kept").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_clear_removes_everything() {
        let (_dir, store) = open();
        store.put(&record("one")).await.unwrap();
        store.put(&record("two")).await.unwrap();

        store.clear().await.unwrap();

        assert!(store.recent(10).await.unwrap().is_empty());
        // Store is still usable afterwards.
        store.put(&record("three")).await.unwrap();
        assert!(store.get("three").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_similar_headwords_are_stored_separately() {
        let (_dir, store) = open();
        store.put(&record("and/or")).await.unwrap();
        store.put(&record("and_or")).await.unwrap();

        let slash = store.get("and/or").await.unwrap().unwrap();
        let underscore = store.get("and_or").await.unwrap().unwrap();
        assert_eq!(slash.headword, "and/or");
        assert_eq!(underscore.headword, "and_or");
        assert_eq!(store.recent(10).await.unwrap().len(), 2);

        store.delete("and_or").await.unwrap();
        assert!(store.get("and/or").await.unwrap().is_some());
        assert!(store.get("and_or").await.unwrap().is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_puts_leave_one_whole_row() {
        let temp_dir = TempDir::new().unwrap();
        let store = std::sync::Arc::new(FileStore::open(temp_dir.path()).unwrap());

        let mut handles = Vec::new();
        for i in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                let mut word = record("race");
                word.origin = Some(format!("writer {}", i));
                store.put(&word).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let read = store.get("race").await.unwrap().unwrap();
        assert_eq!(read.headword, "race");
        assert!(read.origin.unwrap().starts_with("writer "));

        let files = fs::read_dir(paths::words_dir(temp_dir.path()))
            .unwrap()
            .count();
        assert_eq!(files, 1);
    }

    #[tokio::test]
    async fn test_recent_skips_corrupt_rows() {
        let (dir, store) = open();
        store.put(&record("good")).await.unwrap();
        fs::write(paths::words_dir(dir.path()).join("bad.json"), "not json").unwrap();

        let recent = store.recent(10).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].headword, "good");
    }

    #[test]
    fn test_row_with_invalid_meanings_decodes_empty() {
        let row = WordRow {
            word: "test".to_string(),
            phonetic: Some("/test/".to_string()),
            meanings: "invalid json".to_string(),
            origin: None,
            timestamp: 1_700_000_000_000,
        };

        let record = row.decode();
        assert_eq!(record.headword, "test");
        assert!(record.meanings.is_empty());
        assert_eq!(
            record.cached_at.unwrap().timestamp_millis(),
            1_700_000_000_000
        );
    }

    #[test]
    fn test_row_decodes_stored_meanings() {
        let row = WordRow {
            word: "hello".to_string(),
            phonetic: None,
            meanings: r#"[{"partOfSpeech":"noun","definitions":[{"definition":"A greeting","example":"Hello world"}],"synonyms":["hi"],"antonyms":[]}]"#.to_string(),
            origin: Some("Old English".to_string()),
            timestamp: 0,
        };

        let record = row.decode();
        assert_eq!(record.meanings.len(), 1);
        assert_eq!(record.meanings[0].part_of_speech, "noun");
        assert_eq!(record.meanings[0].synonyms, vec!["hi".to_string()]);
    }

    #[test]
    fn test_next_stamp_is_strictly_increasing() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::open(temp_dir.path()).unwrap();

        let a = store.next_stamp();
        let b = store.next_stamp();
        let c = store.next_stamp();
        assert!(a < b && b < c);
    }
}
