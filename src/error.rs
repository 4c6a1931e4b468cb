//! Error types for the cache
//!
//! Provides unified error handling using thiserror.
//!
//! Only failures of caller-supplied fetch operations cross the cache
//! boundary; everything internal (size estimation, lifecycle misuse) is
//! handled locally and never surfaces.

use thiserror::Error;

// == Cache Error Enum ==
/// Errors surfaced by the cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The fetch operation supplied to `get_or_fetch` failed. No entry
    /// was written, so retrying the call retries the fetch.
    #[error("fetch failed for key '{key}': {source}")]
    FetchFailed {
        /// The logical key whose fetch failed
        key: String,
        /// The underlying cause, as reported by the fetch operation
        #[source]
        source: anyhow::Error,
    },
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_failed_preserves_key_and_cause() {
        let err = CacheError::FetchFailed {
            key: "quotes:AAPL".to_string(),
            source: anyhow::anyhow!("connection reset"),
        };

        let message = err.to_string();
        assert!(message.contains("quotes:AAPL"));
        assert!(message.contains("connection reset"));
    }

    #[test]
    fn test_fetch_failed_exposes_source() {
        let err = CacheError::FetchFailed {
            key: "k".to_string(),
            source: anyhow::anyhow!("boom"),
        };

        let source = std::error::Error::source(&err);
        assert!(source.is_some());
    }
}
