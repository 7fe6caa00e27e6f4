//! Simulated web crawler instrumented with callscope.
//!
//! Crawls an in-memory site in parallel through a profiled fetcher, then
//! appends the timing report to a file and prints it.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p callscope-crawler
//! cargo run -p callscope-crawler -- --pages 200 --threads 8 --unit us --output crawl.txt
//! ```

mod crawler;
mod site;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use callscope_core::SystemClock;
use callscope_profiler::{Profiler, ProfilerConfig, TimeUnit};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crawler::crawl;
use site::{PageFetcher, SimulatedFetcher, PAGE_PREFIX};

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// File the report is appended to.
    #[arg(long, default_value = "profile.txt")]
    output: PathBuf,

    /// Maximum number of pages to download.
    #[arg(long, default_value_t = 100)]
    pages: usize,

    /// Worker threads.
    #[arg(long, default_value_t = 4)]
    threads: usize,

    /// Unit for reported durations (ns, us, ms, s).
    #[arg(long, default_value = "ms")]
    unit: TimeUnit,

    /// Simulated download latency in milliseconds.
    #[arg(long, default_value_t = 2)]
    latency_ms: u64,

    /// Page to start from.
    #[arg(long, default_value_t = format!("{PAGE_PREFIX}0"))]
    seed_url: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let profiler = Profiler::with_config(
        SystemClock::new(),
        ProfilerConfig::default().with_unit(args.unit),
    );
    let fetcher = profiler.wrap::<dyn PageFetcher>(Box::new(SimulatedFetcher::new(
        Duration::from_millis(args.latency_ms),
    )))?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(args.threads)
        .build()
        .context("Failed to build crawler thread pool")?;

    info!(
        fetcher = %fetcher.name(),
        threads = args.threads,
        pages = args.pages,
        "Starting crawl from {}",
        args.seed_url
    );
    let summary = pool.install(|| crawl(fetcher.as_ref(), &args.seed_url, args.pages));
    info!(
        visited = summary.visited,
        failed = summary.failed,
        "Crawl finished"
    );

    profiler
        .write_report_to_path(&args.output)
        .with_context(|| format!("Failed to write report to {}", args.output.display()))?;
    info!("Report appended to {}", args.output.display());

    profiler.write_report(&mut std::io::stdout().lock())?;
    Ok(())
}
