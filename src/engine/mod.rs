//! Fetch engine
//!
//! Drains Evotor collection endpoints.
//!
//! # Overview
//!
//! - [`Fetcher::fetch_all`] follows a [`Paginator`] until it reports
//!   [`NextPage::Done`] and returns the concatenated `items` of every page.
//! - [`Fetcher::fetch_envelope`] issues one request and returns the raw
//!   response body, `items` envelope included.
//!
//! A fresh HTTP client is built for every call and dropped when the call
//! returns. Any failed page aborts the whole call; pages already received
//! are discarded.

mod types;

pub use types::{FetchConfig, FetchStats};

use crate::auth::AuthConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig, RequestConfig};
use crate::pagination::{NextPage, PaginationState, Paginator};
use crate::types::{JsonValue, Resource, ResourceItem};
use tracing::{debug, error, info};

/// Fetch engine bound to one API base URL and one token
pub struct Fetcher {
    http: HttpClientConfig,
    auth: AuthConfig,
    config: FetchConfig,
    stats: FetchStats,
}

impl Fetcher {
    /// Create a new fetcher
    pub fn new(http: HttpClientConfig, auth: AuthConfig) -> Self {
        Self {
            http,
            auth,
            config: FetchConfig::default(),
            stats: FetchStats::default(),
        }
    }

    /// Set fetch configuration
    #[must_use]
    pub fn with_config(mut self, config: FetchConfig) -> Self {
        self.config = config;
        self
    }

    /// Get statistics
    pub fn stats(&self) -> &FetchStats {
        &self.stats
    }

    /// Fetch every item of a collection, following continuation cursors
    pub async fn fetch_all(
        &mut self,
        resource: &Resource,
        paginator: &dyn Paginator,
    ) -> Result<Vec<ResourceItem>> {
        let client = HttpClient::with_auth(self.http.clone(), self.auth.clone())?;
        let path = resource.path();

        info!("Fetching {resource} from /{path}");

        let mut items = Vec::new();
        let mut state = PaginationState::new();

        loop {
            if state.page >= self.config.max_pages {
                error!(
                    "Error getting {resource}: still paginating after {} pages",
                    state.page
                );
                return Err(Error::PageLimit {
                    resource: resource.label().to_string(),
                    pages: state.page,
                });
            }

            let mut request = RequestConfig::new();
            for (key, value) in paginator.initial_params(&state) {
                request = request.query(key, value);
            }

            let body: JsonValue = client
                .get_json_with_config(&path, request)
                .await
                .map_err(|e| fail(resource, e))?;

            let page_items = page_items(&body, &self.config.items_field, resource)?;
            let count = page_items.len();
            self.stats.add_page(count);
            items.extend(page_items);

            debug!("{resource} page {}: {count} items", state.page + 1);

            match paginator.process_response(&body, count, &mut state) {
                NextPage::Continue { .. } => {}
                NextPage::Done => break,
            }
        }

        info!(
            "Fetched {} {resource} across {} pages",
            items.len(),
            state.page
        );
        Ok(items)
    }

    /// Fetch a single page and return the response body untouched
    pub async fn fetch_envelope(&mut self, resource: &Resource) -> Result<JsonValue> {
        let client = HttpClient::with_auth(self.http.clone(), self.auth.clone())?;
        let path = resource.path();

        info!("Fetching {resource} from /{path}");

        let body: JsonValue = client
            .get_json(&path)
            .await
            .map_err(|e| fail(resource, e))?;

        let count = body
            .get(&self.config.items_field)
            .and_then(JsonValue::as_array)
            .map_or(0, Vec::len);
        self.stats.add_page(count);

        Ok(body)
    }
}

impl std::fmt::Debug for Fetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fetcher")
            .field("http", &self.http)
            .field("config", &self.config)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

/// Log a failed request and label it with the resource
fn fail(resource: &Resource, err: Error) -> Error {
    match &err {
        Error::HttpStatus { status, body } => {
            error!("Error getting {resource}: {status} - {body}");
        }
        other => error!("Error getting {resource}: {other}"),
    }
    err.for_resource(resource.label())
}

/// Records of one page; a page without the field contributes nothing
fn page_items(body: &JsonValue, field: &str, resource: &Resource) -> Result<Vec<ResourceItem>> {
    match body.get(field) {
        None | Some(JsonValue::Null) => Ok(Vec::new()),
        Some(JsonValue::Array(items)) => Ok(items.clone()),
        Some(_) => Err(Error::structure(format!(
            "'{field}' in {resource} response is not an array"
        ))),
    }
}
