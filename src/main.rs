//! Selah main entry point
//!
//! This is the command-line interface for the Selah Bible scraper.

use anyhow::Context;
use clap::Parser;
use selah::canon::ReferenceTable;
use selah::output::{print_summary, ChapterSink, ChapterWriter};
use selah::scrape::{build_plan, HttpSource, ScrapePool, DEFAULT_WORKERS};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Selah: a BibleHub verse scraper
///
/// Selah fetches verse pages from biblehub.com and writes one JSON file
/// per chapter, holding each verse's translations, original-language
/// lexicon entries, and cross-references. Interrupted runs resume from
/// the chapter files already on disk.
#[derive(Parser, Debug)]
#[command(name = "selah")]
#[command(version = "1.0.0")]
#[command(about = "Scrape Bible verses from BibleHub to JSON files", long_about = None)]
struct Cli {
    /// Scrape only this book (e.g. 'genesis', '1_peter')
    #[arg(short, long)]
    book: Option<String>,

    /// Number of parallel fetch workers
    #[arg(short, long, default_value_t = DEFAULT_WORKERS)]
    workers: usize,

    /// Output directory for chapter JSON files
    #[arg(short, long, default_value = "bible")]
    output: PathBuf,

    /// Re-scrape everything, ignoring previously written chapter files
    #[arg(long)]
    fresh: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let table = Arc::new(ReferenceTable::new());

    // Validate everything user-supplied before the first fetch
    let plan = build_plan(&table, cli.book.as_deref())
        .context("pass a biblehub book slug such as 'genesis' or '1_peter'")?;

    let writer = ChapterWriter::new(&cli.output);
    writer
        .ensure_writable()
        .with_context(|| format!("cannot write to output directory {}", cli.output.display()))?;

    let source = HttpSource::new().context("failed to build HTTP client")?;

    match &cli.book {
        Some(book) => tracing::info!("Scraping book '{}' to {}", book, cli.output.display()),
        None => tracing::info!("Scraping the entire Bible to {}", cli.output.display()),
    }
    if cli.fresh {
        tracing::info!("Fresh run: existing chapter files will be overwritten");
    }

    let pool = ScrapePool::new(Arc::new(source), table, cli.workers).fresh(cli.fresh);
    let report = pool
        .run(&plan, Arc::new(writer) as Arc<dyn ChapterSink>)
        .await?;

    print_summary(&report);

    // Per-verse failures are reported above but do not fail the run
    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("selah=info,warn"),
            1 => EnvFilter::new("selah=debug,info"),
            2 => EnvFilter::new("selah=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
