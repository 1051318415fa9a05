// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::match_same_arms)]

//! # evotor-export
//!
//! Pulls merchant data out of the Evotor cloud API.
//!
//! ## Features
//!
//! - **Stores and devices**: fetch both collections and nest each device
//!   under the store it is registered to
//! - **Goods export**: drain a store's product catalogue through the
//!   `next_cursor` continuation and save it as JSON
//! - **Interactive sessions**: token and store prompts, with a retry offer
//!   after remote failures
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use evotor_export::auth::AuthConfig;
//! use evotor_export::engine::Fetcher;
//! use evotor_export::pagination::CursorPaginator;
//! use evotor_export::{config::AppConfig, Resource};
//!
//! let config = AppConfig::default();
//! let mut fetcher = Fetcher::new(
//!     config.api.http_client_config(),
//!     AuthConfig::bearer("my-token")?,
//! );
//! let goods = fetcher
//!     .fetch_all(
//!         &Resource::Goods { store_id: "20180820-ABCD".into() },
//!         &CursorPaginator::evotor(),
//!     )
//!     .await?;
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │          cli: Runner (prompts, retry, banner)            │
//! └──────────────────────────────────────────────────────────┘
//!                             │
//! ┌──────────┬────────────┬───┴──────────┬─────────┬─────────┐
//! │   Auth   │    HTTP    │  Pagination  │  Join   │ Output  │
//! ├──────────┼────────────┼──────────────┼─────────┼─────────┤
//! │ Bearer   │ GET, JSON  │ next_cursor  │ stores  │ console │
//! │ token    │ status err │ page limit   │ devices │ file    │
//! └──────────┴────────────┴──────────────┴─────────┴─────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Bearer token authentication
pub mod auth;

/// HTTP client
pub mod http;

/// Pagination strategies
pub mod pagination;

/// Collection fetch engine
pub mod engine;

/// Store and device join
pub mod join;

/// JSON output
pub mod output;

/// Configuration file and defaults
pub mod config;

/// Console and file logging
pub mod logging;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
