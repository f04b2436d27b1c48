//! Versification table for the Protestant canon
//!
//! This module exposes the static book/chapter/verse structure that drives
//! the scrape: which books exist, in what order, and how many verses each
//! chapter holds. The table is immutable after construction and is passed
//! explicitly to callers rather than living in a global.

mod books;

pub use books::{BookRecord, BOOKS, OLD_TESTAMENT_BOOKS};

use crate::verse::Language;
use crate::SelahError;
use std::collections::HashMap;

/// Immutable lookup over the canonical versification data
///
/// Book names are matched case-insensitively against the biblehub slugs
/// ("genesis", "1_peter", ...). All query methods fail with
/// `SelahError::UnknownBook` for unrecognized names.
pub struct ReferenceTable {
    index: HashMap<String, usize>,
}

impl ReferenceTable {
    /// Builds the lookup index over the static book table
    pub fn new() -> Self {
        let index = BOOKS
            .iter()
            .enumerate()
            .map(|(position, book)| (book.slug.to_ascii_lowercase(), position))
            .collect();

        Self { index }
    }

    fn lookup(&self, book: &str) -> Result<usize, SelahError> {
        self.index
            .get(&book.to_ascii_lowercase())
            .copied()
            .ok_or_else(|| SelahError::UnknownBook {
                name: book.to_string(),
            })
    }

    /// Returns the canonical slug for a book name (case-insensitive)
    pub fn canonical_slug(&self, book: &str) -> Result<&'static str, SelahError> {
        Ok(BOOKS[self.lookup(book)?].slug)
    }

    /// Returns the number of chapters in a book
    pub fn chapter_count(&self, book: &str) -> Result<u32, SelahError> {
        Ok(BOOKS[self.lookup(book)?].chapters.len() as u32)
    }

    /// Returns the number of verses in a chapter (chapters are 1-indexed)
    pub fn verse_count(&self, book: &str, chapter: u32) -> Result<u32, SelahError> {
        let record = &BOOKS[self.lookup(book)?];

        if chapter == 0 || chapter as usize > record.chapters.len() {
            return Err(SelahError::OutOfRange {
                book: record.slug.to_string(),
                chapter,
                verse: 0,
            });
        }

        Ok(record.chapters[chapter as usize - 1] as u32)
    }

    /// Iterates book slugs in canonical Bible order
    pub fn all_books(&self) -> impl Iterator<Item = &'static str> {
        BOOKS.iter().map(|book| book.slug)
    }

    /// Returns the original language for a book (Old Testament books are
    /// Hebrew, New Testament books Greek)
    pub fn language(&self, book: &str) -> Result<Language, SelahError> {
        let position = self.lookup(book)?;

        if position < OLD_TESTAMENT_BOOKS {
            Ok(Language::Hebrew)
        } else {
            Ok(Language::Greek)
        }
    }

    /// Returns the human-readable book name ("1_peter" -> "1 Peter")
    pub fn display_name(&self, book: &str) -> Result<String, SelahError> {
        let slug = self.canonical_slug(book)?;

        let name = slug
            .split('_')
            .map(title_case)
            .collect::<Vec<_>>()
            .join(" ");

        Ok(name)
    }
}

impl Default for ReferenceTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Uppercases the first character of a word
fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
