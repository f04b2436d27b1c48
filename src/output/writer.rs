//! Chapter JSON files
//!
//! One file per chapter at `{root}/{book}/{chapter}.json`, pretty-printed
//! UTF-8 JSON. A file is only ever written once its chapter is complete,
//! so anything on disk can be trusted by a resumed run.

use crate::output::ChapterSink;
use crate::verse::ChapterResult;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes and reloads chapter files under a fixed output root
pub struct ChapterWriter {
    root: PathBuf,
}

impl ChapterWriter {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// Path of one chapter's file
    pub fn chapter_path(&self, book: &str, chapter: u32) -> PathBuf {
        self.root.join(book).join(format!("{}.json", chapter))
    }

    /// Creates the output root, failing early if it is not writable
    ///
    /// Called during setup so a bad `--output` aborts before any fetching.
    pub fn ensure_writable(&self) -> crate::Result<()> {
        fs::create_dir_all(&self.root)?;

        let probe = self.root.join(".selah_write_probe");
        fs::write(&probe, b"")?;
        fs::remove_file(&probe)?;

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ChapterSink for ChapterWriter {
    fn write_chapter(&self, result: &ChapterResult) -> crate::Result<()> {
        let path = self.chapter_path(&result.book, result.chapter);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(result)?;
        fs::write(&path, json)?;

        tracing::debug!("Wrote {}", path.display());
        Ok(())
    }

    fn load_chapter(&self, book: &str, chapter: u32) -> Option<ChapterResult> {
        let path = self.chapter_path(book, chapter);
        let contents = fs::read_to_string(&path).ok()?;

        match serde_json::from_str(&contents) {
            Ok(result) => Some(result),
            Err(e) => {
                // Corrupt files are re-scraped rather than trusted
                tracing::warn!("Ignoring unreadable chapter file {}: {}", path.display(), e);
                None
            }
        }
    }
}
