//! HTTP page source
//!
//! This module handles all HTTP requests for the scraper:
//! - Building an HTTP client with a proper user agent
//! - Fetching one verse page per request
//! - Error classification (status, timeout, transport)
//!
//! The `PageSource` trait is the seam between the worker pool and the
//! network, so tests can drive the pool from fixture pages.

use crate::FetchError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Production site the scraper targets
pub const DEFAULT_BASE_URL: &str = "https://biblehub.com";

/// A source of raw verse-page markup
///
/// The worker pool only ever talks to this trait; `HttpSource` is the
/// production implementation.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetches the raw markup for one verse page
    async fn fetch_verse(&self, book: &str, chapter: u32, verse: u32)
        -> Result<String, FetchError>;
}

/// Builds an HTTP client with proper configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    let user_agent = format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Reqwest-backed page source
///
/// Verse pages live at `{base}/{book}/{chapter}-{verse}.htm`. The base
/// URL is overridable so tests can point at a mock server.
pub struct HttpSource {
    client: Client,
    base_url: Url,
}

impl HttpSource {
    /// Creates a source pointed at the production site
    pub fn new() -> Result<Self, crate::SelahError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a source pointed at an arbitrary base URL
    pub fn with_base_url(base_url: &str) -> Result<Self, crate::SelahError> {
        Ok(Self {
            client: build_http_client()?,
            base_url: Url::parse(base_url)?,
        })
    }

    /// Builds the page URL for one verse
    pub fn verse_url(&self, book: &str, chapter: u32, verse: u32) -> String {
        let mut url = self.base_url.clone();
        url.set_path(&format!("{}/{}-{}.htm", book, chapter, verse));
        url.to_string()
    }
}

#[async_trait]
impl PageSource for HttpSource {
    async fn fetch_verse(
        &self,
        book: &str,
        chapter: u32,
        verse: u32,
    ) -> Result<String, FetchError> {
        let url = self.verse_url(book, chapter, verse);

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                if e.is_timeout() {
                    return Err(FetchError::Timeout { url });
                }
                return Err(FetchError::Network {
                    url,
                    message: e.to_string(),
                });
            }
        };

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
            });
        }

        match response.text().await {
            Ok(body) => Ok(body),
            Err(e) => Err(FetchError::Network {
                url,
                message: e.to_string(),
            }),
        }
    }
}
