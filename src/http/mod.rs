//! HTTP client module
//!
//! Thin wrapper over `reqwest` that resolves paths against the API base
//! URL, applies bearer authentication and turns non-success statuses into
//! errors carrying the response body. Requests are never retried here.

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
