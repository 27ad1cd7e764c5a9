// Dictionary API HTTP client.
// Issues one GET per headword and decodes the JSON entry array.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    Client, StatusCode, Url,
    header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT},
};
use tracing::{debug, info};

use crate::error::{DictError, Result};

use super::types::RawEntry;

pub const DEFAULT_API_BASE: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";

/// Remote source of dictionary entries.
#[async_trait]
pub trait LookupClient: Send + Sync {
    /// Fetch all entries for a normalized headword.
    /// An empty vector means the source has no entries for it.
    async fn fetch(&self, headword: &str) -> Result<Vec<RawEntry>>;
}

/// Client for the free dictionary API.
pub struct DictionaryClient {
    client: Client,
    base: Url,
}

impl DictionaryClient {
    /// Create a client against `api_base` with a per-request timeout.
    pub fn new(api_base: &str, timeout: Duration) -> Result<Self> {
        let base = Url::parse(api_base).map_err(|e| DictError::Endpoint(e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(DictError::Endpoint(format!("{} cannot be a base URL", api_base)));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static("pocketdict"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(DictError::Network)?;

        Ok(Self { client, base })
    }

    /// Build the entry URL, percent-encoding the headword as a single path segment.
    pub fn entry_url(&self, headword: &str) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| DictError::Endpoint(self.base.to_string()))?
            .pop_if_empty()
            .push(headword);
        Ok(url)
    }
}

#[async_trait]
impl LookupClient for DictionaryClient {
    async fn fetch(&self, headword: &str) -> Result<Vec<RawEntry>> {
        let url = self.entry_url(headword)?;
        debug!(%url, "requesting dictionary entry");

        let response = self.client.get(url).send().await?;

        match response.status() {
            status if status.is_success() => {
                let body = response.text().await?;
                let entries: Vec<RawEntry> = serde_json::from_str(&body)?;
                info!(headword, entries = entries.len(), "fetched dictionary entries");
                Ok(entries)
            }
            // The API answers unknown words with 404 and a "No Definitions Found" body.
            StatusCode::NOT_FOUND => {
                info!(headword, "dictionary has no entries");
                Ok(Vec::new())
            }
            status => Err(DictError::Status {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            }),
        }
    }
}
