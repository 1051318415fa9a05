//! Engine types
//!
//! Configuration and counters for the fetch engine.

/// Configuration for fetch operations
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Upper bound on pages followed for one collection
    pub max_pages: usize,
    /// Field holding the records of a page
    pub items_field: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_pages: 10_000,
            items_field: "items".to_string(),
        }
    }
}

impl FetchConfig {
    /// Set the page limit
    #[must_use]
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }
}

/// Statistics for the fetches issued by one engine
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchStats {
    /// Requests that returned a success status
    pub pages_fetched: usize,
    /// Records accumulated from those pages
    pub records_fetched: usize,
}

impl FetchStats {
    /// Record a page
    pub fn add_page(&mut self, records: usize) {
        self.pages_fetched += 1;
        self.records_fetched += records;
    }
}
