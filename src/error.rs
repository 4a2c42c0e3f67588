//! Error types.
//!
//! The dispatcher and stores never fail. Errors only exist at the edges:
//! a search that could not be completed, or configuration that could not be
//! parsed. A [`SearchError`] that reaches the core travels as
//! [`Action::Error`](crate::Action::Error) and is kept as store state.

use thiserror::Error;

/// A failed repository search.
///
/// `Clone` and `PartialEq` so it can be carried inside an [`Action`](crate::Action)
/// and compared in tests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The query was empty or only whitespace.
    #[error("search query is empty")]
    EmptyQuery,

    /// The request did not complete.
    #[error("network error: {0}")]
    Network(String),

    /// The search API refused the request because of rate limiting.
    ///
    /// `reset_at` is the unix timestamp at which the limit resets, when known.
    #[error("rate limited{}", .reset_at.map(|t| format!(" until {t}")).unwrap_or_default())]
    RateLimited { reset_at: Option<u64> },

    /// The response body could not be decoded.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        SearchError::Decode(err.to_string())
    }
}

/// Configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration syntax: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
