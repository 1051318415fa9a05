//! Pagination module
//!
//! Supports: Cursor (Evotor `paging.next_cursor`), None
//!
//! # Overview
//!
//! Each strategy decides the query parameters for the next request from the
//! previous response body and tracks when pagination is complete. Cursors
//! are opaque: they are only ever checked for presence and echoed back.

mod strategies;
mod types;

pub use strategies::{CursorPaginator, NoPaginator};
pub use types::{extract_path, NextPage, PaginationState, Paginator};
