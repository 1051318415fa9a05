//! Authentication module
//!
//! The Evotor cloud API takes a static application token in the
//! `Authorization: Bearer <token>` header. The `Authenticator` applies it to
//! every outgoing request; there is no refresh or caching.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::{AuthConfig, BearerToken};
