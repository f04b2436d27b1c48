//! Scraping pipeline
//!
//! This module owns the path from URL to `Verse`:
//! - `fetcher` talks to the site (or a fixture source in tests)
//! - `extract` pulls the field groups out of one page
//! - `pool` drives the whole plan with bounded concurrency

mod extract;
mod fetcher;
mod pool;

pub use extract::{
    extract_cross_references, extract_original_words, extract_translations, parse_verse_page,
    ExtractedVerse,
};
pub use fetcher::{build_http_client, HttpSource, PageSource, DEFAULT_BASE_URL};
pub use pool::{build_plan, ChapterPlan, ScrapePool, DEFAULT_WORKERS};

use crate::canon::ReferenceTable;
use crate::verse::{assemble, Verse};
use crate::SelahError;

/// Scrapes one verse: fetch, extract, assemble
///
/// The lexicon language comes from the book's testament via the table,
/// never from the page itself.
pub async fn scrape_verse(
    source: &dyn PageSource,
    table: &ReferenceTable,
    book: &str,
    chapter: u32,
    verse: u32,
) -> Result<Verse, SelahError> {
    let language = table.language(book)?;
    let html = source.fetch_verse(book, chapter, verse).await?;
    let extracted = parse_verse_page(&html, language)?;

    assemble(
        table,
        book,
        chapter,
        verse,
        extracted.translations,
        extracted.original_words,
        extracted.cross_references,
    )
}
