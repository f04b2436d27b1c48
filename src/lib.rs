//! Selah: a BibleHub verse scraper
//!
//! This crate scrapes biblehub.com verse pages and persists the extracted
//! translations, original-language lexicon entries, and cross-references as
//! structured JSON, one file per chapter.

pub mod canon;
pub mod output;
pub mod scrape;
pub mod verse;

use thiserror::Error;

/// Main error type for Selah operations
#[derive(Debug, Error)]
pub enum SelahError {
    #[error("Unknown book: {name}")]
    UnknownBook { name: String },

    #[error("Reference out of range: {book} {chapter}:{verse}")]
    OutOfRange {
        book: String,
        chapter: u32,
        verse: u32,
    },

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Worker task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Errors from fetching a single verse page
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },
}

/// Errors from extracting fields out of a fetched page
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Document has no markup content")]
    EmptyDocument,
}

/// Result type alias for Selah operations
pub type Result<T> = std::result::Result<T, SelahError>;

// Re-export commonly used types
pub use canon::ReferenceTable;
pub use scrape::{scrape_verse, HttpSource, PageSource, ScrapePool};
pub use verse::{assemble, ChapterResult, CrossReference, Language, OriginalWord, Translation, Verse};
