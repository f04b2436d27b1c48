//! Bounded-concurrency scrape driver
//!
//! Fans out one task per verse over a `PageSource`. A single semaphore
//! bounds concurrent fetches across the whole run, not per chapter, so
//! the remote server never sees more than `workers` requests in flight.
//!
//! Results land in pre-sized per-chapter slot arrays indexed by verse
//! number, which makes the final chapter order independent of completion
//! order. Each chapter is handed to the sink exactly once, when its last
//! outstanding verse resolves. Per-verse fetch and extraction failures
//! are recorded and the chapter proceeds; anything else aborts the run.

use crate::canon::ReferenceTable;
use crate::output::{ChapterSink, RunReport, VerseFailure};
use crate::scrape::{scrape_verse, PageSource};
use crate::verse::{ChapterResult, Verse};
use crate::SelahError;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Default number of concurrent fetch workers
pub const DEFAULT_WORKERS: usize = 10;

/// One chapter's worth of work: every verse in `1..=verse_count`
#[derive(Debug, Clone)]
pub struct ChapterPlan {
    /// Book slug, e.g. "1_peter"
    pub book: &'static str,
    pub chapter: u32,
    pub verse_count: u32,
}

/// Builds the ordered list of chapters to scrape
///
/// With no filter the plan covers every book in canonical order; with a
/// filter it covers that one book. An unrecognized book name fails here,
/// before any fetching starts.
pub fn build_plan(
    table: &ReferenceTable,
    book_filter: Option<&str>,
) -> Result<Vec<ChapterPlan>, SelahError> {
    let books: Vec<&'static str> = match book_filter {
        Some(name) => vec![table.canonical_slug(name)?],
        None => table.all_books().collect(),
    };

    let mut plan = Vec::new();
    for book in books {
        for chapter in 1..=table.chapter_count(book)? {
            plan.push(ChapterPlan {
                book,
                chapter,
                verse_count: table.verse_count(book, chapter)?,
            });
        }
    }

    Ok(plan)
}

/// In-flight state for one chapter
struct ChapterState {
    book: &'static str,
    chapter: u32,

    /// One slot per verse, indexed by verse number - 1; each is written
    /// at most once
    slots: Vec<Option<Verse>>,

    /// Verses still unresolved; the chapter is finalized when this hits 0
    remaining: usize,
}

impl ChapterState {
    /// Consumes the slots into the final verse-ascending chapter record
    ///
    /// Failed verses leave no gap entry; only resolved verses appear.
    fn finish(&mut self) -> ChapterResult {
        ChapterResult {
            book: self.book.to_string(),
            chapter: self.chapter,
            verses: std::mem::take(&mut self.slots).into_iter().flatten().collect(),
        }
    }
}

/// Drives a scrape plan to completion with bounded concurrency
pub struct ScrapePool {
    source: Arc<dyn PageSource>,
    table: Arc<ReferenceTable>,
    workers: usize,
    fresh: bool,
}

impl ScrapePool {
    pub fn new(source: Arc<dyn PageSource>, table: Arc<ReferenceTable>, workers: usize) -> Self {
        Self {
            source,
            table,
            workers: workers.max(1),
            fresh: false,
        }
    }

    /// When set, previously written chapter files are ignored instead of
    /// resumed from
    pub fn fresh(mut self, fresh: bool) -> Self {
        self.fresh = fresh;
        self
    }

    /// Runs the whole plan, writing each chapter to the sink as it completes
    ///
    /// Fetch and extraction failures are recorded per verse in the report.
    /// An out-of-range reference escaping a task means the versification
    /// table disagrees with itself; that is logged loudly and aborts the
    /// run, as do I/O errors from the sink.
    pub async fn run(
        &self,
        plan: &[ChapterPlan],
        sink: Arc<dyn ChapterSink>,
    ) -> Result<RunReport, SelahError> {
        let start = Instant::now();
        let semaphore = Arc::new(Semaphore::new(self.workers));
        let completed = Arc::new(AtomicU64::new(0));
        let chapters_written = Arc::new(AtomicU64::new(0));
        let failures: Arc<Mutex<Vec<VerseFailure>>> = Arc::new(Mutex::new(Vec::new()));
        let mut skipped: u64 = 0;
        let mut tasks: JoinSet<Result<(), SelahError>> = JoinSet::new();

        let total_verses: u64 = plan.iter().map(|c| u64::from(c.verse_count)).sum();
        tracing::info!(
            "Scraping {} verses across {} chapters with {} workers",
            total_verses,
            plan.len(),
            self.workers
        );

        for chapter_plan in plan {
            let verse_count = chapter_plan.verse_count as usize;
            let mut slots: Vec<Option<Verse>> = vec![None; verse_count];

            // Pre-fill slots from a previous run's file before spawning
            if !self.fresh {
                if let Some(existing) = sink.load_chapter(chapter_plan.book, chapter_plan.chapter)
                {
                    for verse in existing.verses {
                        let number = verse.verse as usize;
                        if number >= 1 && number <= verse_count && slots[number - 1].is_none() {
                            slots[number - 1] = Some(verse);
                            skipped += 1;
                        }
                    }
                }
            }

            let pending: Vec<u32> = (1..=chapter_plan.verse_count)
                .filter(|verse| slots[*verse as usize - 1].is_none())
                .collect();

            if pending.is_empty() {
                tracing::debug!(
                    "{} {} already complete, skipping",
                    chapter_plan.book,
                    chapter_plan.chapter
                );
                continue;
            }

            let state = Arc::new(Mutex::new(ChapterState {
                book: chapter_plan.book,
                chapter: chapter_plan.chapter,
                slots,
                remaining: pending.len(),
            }));

            for verse in pending {
                let source = Arc::clone(&self.source);
                let table = Arc::clone(&self.table);
                let sink = Arc::clone(&sink);
                let semaphore = Arc::clone(&semaphore);
                let state = Arc::clone(&state);
                let completed = Arc::clone(&completed);
                let chapters_written = Arc::clone(&chapters_written);
                let failures = Arc::clone(&failures);
                let book = chapter_plan.book;
                let chapter = chapter_plan.chapter;

                tasks.spawn(async move {
                    let permit = match semaphore.acquire_owned().await {
                        Ok(permit) => permit,
                        // The semaphore is never closed
                        Err(_) => return Ok(()),
                    };
                    let result = scrape_verse(source.as_ref(), &table, book, chapter, verse).await;
                    drop(permit);

                    let outcome = match result {
                        Ok(record) => {
                            let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                            if done % 100 == 0 {
                                let seconds = start.elapsed().as_secs_f64();
                                let rate = if seconds > 0.0 { done as f64 / seconds } else { 0.0 };
                                tracing::info!(
                                    "Progress: {} verses scraped, {:.1} verses/sec",
                                    done,
                                    rate
                                );
                            }
                            Some(record)
                        }
                        Err(error @ (SelahError::Fetch(_) | SelahError::Extraction(_))) => {
                            tracing::warn!("{} {}:{} failed: {}", book, chapter, verse, error);
                            failures.lock().unwrap().push(VerseFailure {
                                book: book.to_string(),
                                chapter,
                                verse,
                                error: error.to_string(),
                            });
                            None
                        }
                        Err(fatal) => return Err(fatal),
                    };

                    let finished = {
                        let mut state = state.lock().unwrap();
                        if let Some(record) = outcome {
                            state.slots[verse as usize - 1] = Some(record);
                        }
                        state.remaining -= 1;
                        if state.remaining == 0 {
                            Some(state.finish())
                        } else {
                            None
                        }
                    };

                    if let Some(result) = finished {
                        sink.write_chapter(&result)?;
                        chapters_written.fetch_add(1, Ordering::Relaxed);
                        tracing::info!(
                            "Wrote {} {} ({} verses)",
                            result.book,
                            result.chapter,
                            result.verses.len()
                        );
                    }

                    Ok(())
                });
            }
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Ok(())) => {}
                Ok(Err(error)) => {
                    tracing::error!("Aborting run: {}", error);
                    return Err(error);
                }
                Err(join_error) => return Err(SelahError::Join(join_error)),
            }
        }

        let failures = std::mem::take(&mut *failures.lock().unwrap());

        Ok(RunReport {
            completed: completed.load(Ordering::Relaxed),
            skipped,
            chapters_written: chapters_written.load(Ordering::Relaxed),
            failures,
            elapsed: start.elapsed(),
        })
    }
}
