//! Pagination types and traits
//!
//! Defines the core pagination abstractions used by all strategies.

use serde_json::Value;
use std::collections::BTreeMap;

/// Result of the next page computation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// More pages available with these query parameters
    Continue {
        /// Query parameters to add/replace
        query_params: BTreeMap<String, String>,
    },
    /// No more pages
    Done,
}

impl NextPage {
    /// Create a continuation with query parameters
    pub fn with_params(params: BTreeMap<String, String>) -> Self {
        Self::Continue {
            query_params: params,
        }
    }

    /// Create a continuation with a single parameter
    pub fn with_param(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut params = BTreeMap::new();
        params.insert(key.into(), value.into());
        Self::with_params(params)
    }

    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Check if this is a continue result
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue { .. })
    }
}

/// Tracks pagination state during iteration
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    /// Pages processed so far
    pub page: usize,
    /// Current cursor value
    pub cursor: Option<String>,
    /// Total records fetched so far
    pub total_fetched: u64,
    /// Is pagination complete?
    pub done: bool,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark pagination as complete
    pub fn mark_done(&mut self) {
        self.done = true;
        self.cursor = None;
    }

    /// Increment page number
    pub fn next_page(&mut self) {
        self.page += 1;
    }

    /// Set cursor
    pub fn set_cursor(&mut self, cursor: String) {
        self.cursor = Some(cursor);
    }

    /// Add to total fetched
    pub fn add_fetched(&mut self, count: u64) {
        self.total_fetched += count;
    }
}

/// Core trait for pagination strategies
pub trait Paginator: Send + Sync {
    /// Query parameters for the request about to be issued
    fn initial_params(&self, state: &PaginationState) -> BTreeMap<String, String>;

    /// Process a response and determine if there's a next page
    fn process_response(
        &self,
        body: &Value,
        records_count: usize,
        state: &mut PaginationState,
    ) -> NextPage;
}

/// Extract a scalar from JSON using a dotted path like `paging.next_cursor`
///
/// A leading `$.` is accepted. Missing keys, `null`, arrays and objects all
/// yield `None`.
pub fn extract_path(value: &Value, path: &str) -> Option<String> {
    let path = path.strip_prefix("$.").unwrap_or(path);

    let mut current = value;
    for part in path.split('.') {
        match current {
            Value::Object(map) => {
                current = map.get(part)?;
            }
            _ => return None,
        }
    }

    match current {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
