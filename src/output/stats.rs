//! Run statistics and summary reporting
//!
//! Collects what happened over a scrape run and prints it in a formatted
//! manner once the run finishes. Per-verse failures are listed here so a
//! run that completes with errors still reports them without failing.

use std::time::Duration;

/// One verse that could not be scraped
#[derive(Debug, Clone)]
pub struct VerseFailure {
    /// Book slug, e.g. "1_peter"
    pub book: String,
    pub chapter: u32,
    pub verse: u32,

    /// What went wrong, as reported by the fetch or extraction
    pub error: String,
}

impl VerseFailure {
    /// Human-readable reference, e.g. "1_peter 5:14"
    pub fn reference(&self) -> String {
        format!("{} {}:{}", self.book, self.chapter, self.verse)
    }
}

/// Summary of a completed scrape run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Verses fetched and written during this run
    pub completed: u64,

    /// Verses already on disk and not re-fetched
    pub skipped: u64,

    /// Chapter files written during this run
    pub chapters_written: u64,

    /// Per-verse failures recorded during the run
    pub failures: Vec<VerseFailure>,

    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

impl RunReport {
    pub fn failed(&self) -> u64 {
        self.failures.len() as u64
    }

    /// Verses fetched per second over the whole run
    pub fn rate(&self) -> f64 {
        let seconds = self.elapsed.as_secs_f64();
        if seconds > 0.0 {
            self.completed as f64 / seconds
        } else {
            0.0
        }
    }
}

/// Prints the run report to stdout in a formatted manner
pub fn print_summary(report: &RunReport) {
    println!("=== Scrape Summary ===\n");

    println!("  Verses scraped: {}", report.completed);
    if report.skipped > 0 {
        println!("  Verses skipped (already on disk): {}", report.skipped);
    }
    println!("  Failed: {}", report.failed());
    println!("  Chapters written: {}", report.chapters_written);
    println!("  Time: {}", format_elapsed(report.elapsed));
    println!("  Rate: {:.1} verses/sec", report.rate());

    if !report.failures.is_empty() {
        println!("\nFailed verses:");
        for failure in &report.failures {
            println!("  - {}: {}", failure.reference(), failure.error);
        }
    }
}

/// Formats a duration as HH:MM:SS
fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    format!("{:02}:{:02}:{:02}", total / 3600, (total % 3600) / 60, total % 60)
}
