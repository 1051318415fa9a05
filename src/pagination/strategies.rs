//! Pagination strategy implementations

use super::types::{extract_path, NextPage, PaginationState, Paginator};
use serde_json::Value;
use std::collections::BTreeMap;

// ============================================================================
// Cursor Pagination
// ============================================================================

/// Cursor-based pagination
///
/// The response carries an opaque continuation token; the next request
/// sends it back as a query parameter. Pagination ends when the token is
/// absent, `null` or empty. Evotor uses `?next_cursor=<paging.next_cursor>`.
#[derive(Debug, Clone)]
pub struct CursorPaginator {
    /// Query parameter name for cursor
    pub cursor_param: String,
    /// Dotted path to the cursor in the response body
    pub cursor_path: String,
}

impl CursorPaginator {
    /// Create a new cursor paginator
    pub fn new(cursor_param: impl Into<String>, cursor_path: impl Into<String>) -> Self {
        Self {
            cursor_param: cursor_param.into(),
            cursor_path: cursor_path.into(),
        }
    }

    /// The `next_cursor` scheme used by the Evotor cloud API
    pub fn evotor() -> Self {
        Self::new("next_cursor", "paging.next_cursor")
    }
}

impl Default for CursorPaginator {
    fn default() -> Self {
        Self::evotor()
    }
}

impl Paginator for CursorPaginator {
    fn initial_params(&self, state: &PaginationState) -> BTreeMap<String, String> {
        let mut params = BTreeMap::new();
        if let Some(cursor) = &state.cursor {
            params.insert(self.cursor_param.clone(), cursor.clone());
        }
        params
    }

    fn process_response(
        &self,
        body: &Value,
        records_count: usize,
        state: &mut PaginationState,
    ) -> NextPage {
        state.add_fetched(records_count as u64);
        state.next_page();

        match extract_path(body, &self.cursor_path) {
            Some(cursor) if !cursor.is_empty() => {
                state.set_cursor(cursor.clone());
                NextPage::with_param(&self.cursor_param, cursor)
            }
            _ => {
                state.mark_done();
                NextPage::Done
            }
        }
    }
}

// ============================================================================
// No Pagination
// ============================================================================

/// No pagination - single request
#[derive(Debug, Clone, Default)]
pub struct NoPaginator;

impl Paginator for NoPaginator {
    fn initial_params(&self, _state: &PaginationState) -> BTreeMap<String, String> {
        BTreeMap::new()
    }

    fn process_response(
        &self,
        _body: &Value,
        records_count: usize,
        state: &mut PaginationState,
    ) -> NextPage {
        state.add_fetched(records_count as u64);
        state.next_page();
        state.mark_done();
        NextPage::Done
    }
}
