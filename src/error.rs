//! Error types for evotor-export
//!
//! All public APIs return `Result<T, Error>` where Error is defined here.
//! The session controller uses [`Error::is_recoverable`] to decide whether
//! the operator gets a retry prompt or the process aborts.

use thiserror::Error;

/// The main error type for evotor-export
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Remote Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Error getting {resource}: {status}")]
    RemoteFetch {
        resource: String,
        status: u16,
        body: String,
    },

    #[error("Gave up on {resource} after {pages} pages")]
    PageLimit { resource: String, pages: usize },

    // ============================================================================
    // Payload Errors
    // ============================================================================
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Missing field '{field}' in {context}")]
    MissingField { field: String, context: String },

    #[error("Unexpected payload shape: {message}")]
    Structure { message: String },

    // ============================================================================
    // Session Errors
    // ============================================================================
    #[error("Authentication failed: {message}")]
    Auth { message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Interrupted")]
    Interrupted,

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Output error: {message}")]
    Output { message: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a remote fetch error
    pub fn remote(resource: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self::RemoteFetch {
            resource: resource.into(),
            status,
            body: body.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Attach the resource being fetched to a bare HTTP status error
    #[must_use]
    pub fn for_resource(self, resource: impl Into<String>) -> Self {
        match self {
            Error::HttpStatus { status, body } => Error::remote(resource, status, body),
            other => other,
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>, context: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
            context: context.into(),
        }
    }

    /// Create a structure error
    pub fn structure(message: impl Into<String>) -> Self {
        Self::Structure {
            message: message.into(),
        }
    }

    /// Create an auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create an output error
    pub fn output(message: impl Into<String>) -> Self {
        Self::Output {
            message: message.into(),
        }
    }

    /// HTTP status carried by a remote fetch error
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::RemoteFetch { status, .. } | Error::HttpStatus { status, .. } => {
                Some(*status)
            }
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if the operator may retry the flow after this error
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::RemoteFetch { .. }
                | Error::HttpStatus { .. }
                | Error::Http(_)
                | Error::PageLimit { .. }
                | Error::Auth { .. }
                | Error::InvalidInput { .. }
        )
    }
}

/// Result type alias for evotor-export
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
