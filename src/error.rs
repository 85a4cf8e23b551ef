// src/error.rs
// =============================================================================
// Error types for the crawl engine.
//
// The binary layer (main.rs) uses anyhow for convenience, but the engine
// itself returns a typed error so callers can tell a failed page fetch apart
// from bad input.
// =============================================================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrawlError {
    /// Network, protocol or body-decoding failure while fetching a page
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered, but not with a 2xx status
    #[error("failed to fetch {url}: HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// The HTTP client itself couldn't be set up
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Rejected before any network call was made
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl CrawlError {
    /// True for errors that came from fetching a page (as opposed to bad input)
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, CrawlError::Fetch { .. } | CrawlError::HttpStatus { .. })
    }
}

pub type Result<T> = std::result::Result<T, CrawlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_is_fetch_failure() {
        let err = CrawlError::HttpStatus {
            url: "https://en.wikipedia.org/wiki/Nowhere".to_string(),
            status: 404,
        };
        assert!(err.is_fetch_failure());
        assert_eq!(
            err.to_string(),
            "failed to fetch https://en.wikipedia.org/wiki/Nowhere: HTTP 404"
        );
    }

    #[test]
    fn test_invalid_input_is_not_fetch_failure() {
        let err = CrawlError::InvalidInput("empty page path".to_string());
        assert!(!err.is_fetch_failure());
    }
}
