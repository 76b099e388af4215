use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use moka::future::Cache;
use serde::Deserialize;
use tracing::debug;

const OMDB_BASE_URL: &str = "https://www.omdbapi.com/";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(4);
const CACHE_CAPACITY: u64 = 1000;
const CACHE_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// What a provider lookup yields on success. `poster: None` means the
/// provider knew the title but had no usable image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderRecord {
    pub poster: Option<String>,
    pub rating: Option<String>,
    pub imdb_id: Option<String>,
}

/// Seam over the external metadata service so the cache layer can be
/// exercised against a stub.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Best-effort lookup. Any provider failure (transport, timeout,
    /// not-found) surfaces as `None`; errors never escape this seam.
    async fn fetch(&self, title: &str, year: Option<i64>) -> Option<ProviderRecord>;
}

/// OMDb-backed provider. Queries title+year first, then title alone;
/// the first provider-confirmed hit wins.
pub struct OmdbProvider {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl OmdbProvider {
    pub fn new(api_key: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("constructing omdb http client")?;
        Ok(Self {
            client,
            api_key,
            base_url: OMDB_BASE_URL.to_string(),
        })
    }

    async fn query(&self, key: &str, title: &str, year: Option<i64>) -> Result<Option<ProviderRecord>> {
        let mut request = self
            .client
            .get(&self.base_url)
            .query(&[("apikey", key), ("t", title)]);
        if let Some(year) = year {
            request = request.query(&[("y", year.to_string())]);
        }

        let response = request.send().await.context("sending omdb request")?;
        if !response.status().is_success() {
            debug!(status = %response.status(), title, "omdb returned non-success status");
            return Ok(None);
        }

        let payload: OmdbPayload = response.json().await.context("decoding omdb response")?;
        Ok(record_from_payload(payload))
    }
}

#[async_trait]
impl MetadataProvider for OmdbProvider {
    async fn fetch(&self, title: &str, year: Option<i64>) -> Option<ProviderRecord> {
        // Credential absence was already warned about at startup.
        let key = self.api_key.as_deref()?;

        let mut attempts = Vec::with_capacity(2);
        if year.is_some() {
            attempts.push(year);
        }
        attempts.push(None);

        for attempt_year in attempts {
            match self.query(key, title, attempt_year).await {
                Ok(Some(record)) => return Some(record),
                Ok(None) => {}
                Err(err) => {
                    debug!(error = %err, title, "omdb lookup attempt failed");
                }
            }
        }
        None
    }
}

#[derive(Debug, Deserialize)]
struct OmdbPayload {
    #[serde(rename = "Response")]
    response: Option<String>,
    #[serde(rename = "Poster")]
    poster: Option<String>,
    #[serde(rename = "imdbRating")]
    imdb_rating: Option<String>,
    #[serde(rename = "imdbID")]
    imdb_id: Option<String>,
}

fn record_from_payload(payload: OmdbPayload) -> Option<ProviderRecord> {
    if payload.response.as_deref() != Some("True") {
        return None;
    }
    // OMDb reports "no image" as the literal string "N/A".
    Some(ProviderRecord {
        poster: payload.poster.filter(|value| value != "N/A"),
        rating: payload.imdb_rating.filter(|value| value != "N/A"),
        imdb_id: payload.imdb_id,
    })
}

/// Bounded TTL cache in front of a [`MetadataProvider`].
///
/// `resolve` is the sole write path: positive and negative outcomes
/// are both cached, and concurrent resolutions of the same key
/// coalesce into a single provider call via `get_with`.
pub struct LookupClient {
    provider: Arc<dyn MetadataProvider>,
    cache: Cache<String, Option<ProviderRecord>>,
}

impl LookupClient {
    pub fn new(provider: Arc<dyn MetadataProvider>) -> Self {
        Self::with_capacity(provider, CACHE_CAPACITY, CACHE_TTL)
    }

    pub fn with_capacity(
        provider: Arc<dyn MetadataProvider>,
        capacity: u64,
        ttl: Duration,
    ) -> Self {
        let cache = Cache::builder()
            .max_capacity(capacity)
            .time_to_live(ttl)
            .build();
        Self { provider, cache }
    }

    pub async fn resolve(&self, title: &str, year: Option<i64>) -> Option<ProviderRecord> {
        let key = cache_key(title, year);
        let provider = Arc::clone(&self.provider);
        let title = title.to_string();
        self.cache
            .get_with(key, async move { provider.fetch(&title, year).await })
            .await
    }
}

fn cache_key(title: &str, year: Option<i64>) -> String {
    let year = year.map(|value| value.to_string()).unwrap_or_default();
    format!("{}::{}", title.trim().to_lowercase(), year)
}
