//! Auth configuration types

use crate::error::{Error, Result};

/// A non-empty bearer token
///
/// `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// Validate and wrap a token as typed by the operator
    pub fn new(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        let token = raw.trim();
        if token.is_empty() {
            return Err(Error::auth("token must not be empty"));
        }
        Ok(Self(token.to_string()))
    }

    /// The raw token value
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BearerToken(***)")
    }
}

/// Authentication configuration
#[derive(Debug, Clone, Default)]
pub enum AuthConfig {
    /// No authentication required
    #[default]
    None,

    /// Bearer token authentication
    Bearer {
        /// The bearer token
        token: BearerToken,
    },
}

impl AuthConfig {
    /// Create a bearer config from a raw token
    pub fn bearer(token: impl Into<String>) -> Result<Self> {
        Ok(Self::Bearer {
            token: BearerToken::new(token)?,
        })
    }
}
