//! Catalog API client.
//!
//! Talks to one remote catalog deployment and presents a uniform
//! contract to callers regardless of which envelope shape the backend
//! returns (see [`envelope`]). Page and detail responses are cached via
//! `moka` (5-minute TTL); search and random are never cached.
//!
//! # Endpoints
//!
//! - `GET /book?page={n}` - page of items
//! - `GET /book?{filters}` - filtered/search items
//! - `GET /book/{id}` - single item detail
//! - `GET /random_book[?{filters}]` - one random item
//!
//! # Example
//!
//! ```rust,ignore
//! use pustaka_storefront::catalog::CatalogClient;
//! use pustaka_storefront::config::CatalogConfig;
//!
//! let client = CatalogClient::new(&CatalogConfig::default());
//! let page = client.fetch_page(1).await?;
//! let detail = client.fetch_detail(&page.books[0].id).await?;
//! ```

mod cache;
mod envelope;
pub mod types;

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use futures::future::try_join_all;
use moka::future::Cache;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use pustaka_core::BookId;

use crate::config::CatalogConfig;
use cache::CacheValue;
use types::{Book, BookFilters, BookPage};

/// Page count fetched by [`CatalogClient::fetch_all`].
const ALL_BOOKS_PAGE_COUNT: u32 = 10;

/// Errors that can occur when talking to the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Transport-level failure (connection, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status on a list or search fetch.
    #[error("Fetch failed with status {0}")]
    Status(reqwest::StatusCode),

    /// Detail fetch did not yield the requested item.
    #[error("Not found: {0}")]
    NotFound(String),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Client for the catalog API.
///
/// Cheaply cloneable; all clones share the same connection pool and
/// response cache.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: String,
    random_timeout: Duration,
    cache: Cache<String, CacheValue>,
}

impl CatalogClient {
    /// Create a new catalog client.
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.clone(),
                random_timeout: config.random_timeout,
                cache,
            }),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.inner.base_url)
    }

    /// Fetch one page of the catalog.
    ///
    /// An unrecognized envelope yields an empty page, never an error.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Status` on a non-success HTTP status and
    /// `CatalogError::Http` on transport failures.
    #[instrument(skip(self))]
    pub async fn fetch_page(&self, page: u32) -> Result<BookPage, CatalogError> {
        let cache_key = format!("page:{page}");

        if let Some(CacheValue::Page(cached)) = self.inner.cache.get(&cache_key).await {
            debug!("cache hit for page");
            return Ok(cached);
        }

        let response = self
            .inner
            .client
            .get(self.endpoint("book"))
            .query(&[("page", page)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status));
        }

        let body: Value = response.json().await?;
        let result = envelope::book_page(body);

        self.inner
            .cache
            .insert(cache_key, CacheValue::Page(result.clone()))
            .await;

        Ok(result)
    }

    /// Fetch `count` pages concurrently and merge the results.
    ///
    /// All-or-nothing join semantics: if any page request fails, the
    /// whole operation fails. Results are concatenated in page order and
    /// deduplicated by identity, keeping the first occurrence.
    ///
    /// # Errors
    ///
    /// Returns the first page error encountered.
    #[instrument(skip(self))]
    pub async fn fetch_pages_concurrent(&self, count: u32) -> Result<Vec<Book>, CatalogError> {
        let pages = try_join_all((1..=count).map(|page| self.fetch_page(page))).await?;

        let mut seen = HashSet::new();
        let books = pages
            .into_iter()
            .flat_map(|page| page.books)
            .filter(|book| seen.insert(book.id.clone()))
            .collect();

        Ok(books)
    }

    /// Fetch the default superset used for client-side pagination.
    ///
    /// # Errors
    ///
    /// Same as [`Self::fetch_pages_concurrent`].
    pub async fn fetch_all(&self) -> Result<Vec<Book>, CatalogError> {
        self.fetch_pages_concurrent(ALL_BOOKS_PAGE_COUNT).await
    }

    /// Search the catalog with named criteria.
    ///
    /// Only populated filter values are serialized into the query. Not
    /// cached: search results are too varied to be worth the memory.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Status` on a non-success HTTP status.
    #[instrument(skip(self, filters))]
    pub async fn search(&self, filters: &BookFilters) -> Result<Vec<Book>, CatalogError> {
        let response = self
            .inner
            .client
            .get(self.endpoint("book"))
            .query(&filters.query_pairs())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status));
        }

        let body: Value = response.json().await?;
        Ok(envelope::book_page(body).books)
    }

    /// Fetch a single item by identity.
    ///
    /// The detail envelope is normalized to one object and root-level
    /// detail fields are back-filled into `details`, so callers can rely
    /// on `details.*` uniformly.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` on a non-success HTTP status or
    /// when no variant of the response yields a usable item.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn fetch_detail(&self, id: &BookId) -> Result<Book, CatalogError> {
        let cache_key = format!("detail:{id}");

        if let Some(CacheValue::Detail(cached)) = self.inner.cache.get(&cache_key).await {
            debug!("cache hit for detail");
            return Ok(*cached);
        }

        let response = self
            .inner
            .client
            .get(self.endpoint(&format!("book/{id}")))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::NotFound(format!(
                "book {id} (status {status})"
            )));
        }

        let body: Value = response.json().await?;
        let book = envelope::book_detail(body)
            .ok_or_else(|| CatalogError::NotFound(format!("book {id} (unusable payload)")))?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Detail(Box::new(book.clone())))
            .await;

        Ok(book)
    }

    /// Fetch one random item, with optional filters.
    ///
    /// Applies a deadline to its own request only. Timeouts and
    /// transport-level failures are swallowed and yield `Ok(None)` - the
    /// caller is expected to retry - as does a body without a usable
    /// item. Never cached.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Status` on any non-success HTTP status.
    #[instrument(skip(self, filters))]
    pub async fn fetch_random(
        &self,
        filters: Option<&BookFilters>,
    ) -> Result<Option<Book>, CatalogError> {
        let mut request = self.inner.client.get(self.endpoint("random_book"));
        if let Some(filters) = filters {
            request = request.query(&filters.query_pairs());
        }

        let response = match tokio::time::timeout(self.inner.random_timeout, request.send()).await
        {
            Err(_elapsed) => {
                warn!("random book request timed out");
                return Ok(None);
            }
            Ok(Err(error)) => {
                warn!(%error, "random book request failed at transport level");
                return Ok(None);
            }
            Ok(Ok(response)) => response,
        };

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status));
        }

        match response.json::<Value>().await {
            Ok(body) => Ok(envelope::book_detail(body)),
            Err(error) => {
                warn!(%error, "random book body could not be read");
                Ok(None)
            }
        }
    }
}
