//! Error types for the resolution engine

/// Result type alias for resolution operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving a station reference
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP transport failure (DNS, connect, timeout, TLS)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("Unexpected HTTP status: {0}")]
    Status(reqwest::StatusCode),

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// XML parsing failed
    #[error("XML parsing failed: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Playlist expansion descended deeper than the configured limit
    #[error("Playlist nesting exceeds {0} levels")]
    RecursionLimit(usize),

    /// Response body was already consumed by an earlier handler
    #[error("Response body already consumed")]
    BodyConsumed,

    /// Cache population failed
    #[error("Cache error: {0}")]
    Cache(#[from] anyhow::Error),

    /// Cooperative cancellation observed
    #[error("Resolution cancelled")]
    Cancelled,
}

impl Error {
    /// True for the transport/status class that URI handlers and the vendor
    /// provider swallow at their own boundary (a failed station must not
    /// abort sibling resolutions). Parse errors and cancellation are never
    /// recoverable.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::Http(_) | Error::Status(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_and_status_are_recoverable() {
        assert!(Error::Status(reqwest::StatusCode::NOT_FOUND).is_recoverable());
        assert!(!Error::Cancelled.is_recoverable());
        assert!(!Error::RecursionLimit(8).is_recoverable());
        assert!(!Error::BodyConsumed.is_recoverable());
    }
}
