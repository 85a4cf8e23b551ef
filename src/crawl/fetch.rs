// src/crawl/fetch.rs
// =============================================================================
// Fetching page text.
//
// The crawler only needs "give me the text of this in-site path", so that's
// all the PageFetcher trait asks for. HttpFetcher is the real implementation;
// tests plug in an in-memory one.
//
// Character sets: reqwest reads the charset parameter of the Content-Type
// header ("text/html; charset=ISO-8859-1") and decodes the body with it,
// falling back to UTF-8 when there is none.
//
// Rust concepts:
// - BoxFuture: a boxed, Send future, so the trait works without async-trait
// - Lifetimes: the returned future borrows both the fetcher and the path
// =============================================================================

use crate::error::{CrawlError, Result};
use futures::future::BoxFuture;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Default site the crawler walks
pub const DEFAULT_BASE_URL: &str = "https://en.wikipedia.org";

/// User-Agent header sent with every request
///
/// Its product token is the agent name we look up in robots.txt.
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

// Charset used when the server doesn't name one
const DEFAULT_CHARSET: &str = "utf-8";

/// Anything that can return the decoded text of an in-site page
pub trait PageFetcher {
    fn fetch<'a>(&'a self, path: &'a str) -> BoxFuture<'a, Result<String>>;
}

/// Fetches pages over HTTP(S), relative to a base URL
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    base: Url,
}

impl HttpFetcher {
    pub fn new(base_url: &str) -> Result<Self> {
        let base = Url::parse(base_url)
            .map_err(|e| CrawlError::InvalidInput(format!("invalid base URL '{}': {}", base_url, e)))?;

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(10)) // 10 second timeout per request
            .build()
            .map_err(CrawlError::Client)?;

        Ok(Self { client, base })
    }

    /// Absolute URL of an in-site path
    pub fn page_url(&self, path: &str) -> Result<Url> {
        if path.trim().is_empty() {
            return Err(CrawlError::InvalidInput("empty page path".to_string()));
        }

        self.base
            .join(path)
            .map_err(|e| CrawlError::InvalidInput(format!("invalid page path '{}': {}", path, e)))
    }

    async fn fetch_text(&self, path: &str) -> Result<String> {
        let url = self.page_url(path)?;
        debug!(%url, "fetching page");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| CrawlError::Fetch {
                url: url.to_string(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(CrawlError::HttpStatus {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        response
            .text_with_charset(DEFAULT_CHARSET)
            .await
            .map_err(|source| CrawlError::Fetch {
                url: url.to_string(),
                source,
            })
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch<'a>(&'a self, path: &'a str) -> BoxFuture<'a, Result<String>> {
        Box::pin(self.fetch_text(path))
    }
}
