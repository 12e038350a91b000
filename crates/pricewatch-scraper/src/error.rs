use thiserror::Error;

/// Failure of a single HTTP GET, before any status handling.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("transport error: {0}")]
    Transport(String),
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid CSS selector \"{selector}\": {reason}")]
    InvalidSelector { selector: String, reason: String },
}

/// Startup errors raised while building a [`crate::PriceSearch`].
#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("source {source_id} has an unusable extraction rule: {error}")]
    InvalidRule {
        source_id: String,
        #[source]
        error: ExtractError,
    },

    #[error("no sources configured")]
    NoSources,
}
