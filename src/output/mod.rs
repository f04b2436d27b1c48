//! Output layer
//!
//! This module handles everything written for the user:
//! - Chapter JSON files under `{root}/{book}/{chapter}.json`
//! - The end-of-run summary report

mod stats;
mod writer;

pub use stats::{print_summary, RunReport, VerseFailure};
pub use writer::ChapterWriter;

use crate::verse::ChapterResult;

/// Destination for completed chapters
///
/// The scrape pool hands each finished chapter to `write_chapter` exactly
/// once; `load_chapter` exposes previously written data so an interrupted
/// run can resume without re-fetching.
pub trait ChapterSink: Send + Sync {
    /// Persists one complete chapter
    fn write_chapter(&self, result: &ChapterResult) -> crate::Result<()>;

    /// Loads a previously written chapter, or None if absent or unreadable
    fn load_chapter(&self, book: &str, chapter: u32) -> Option<ChapterResult>;
}
