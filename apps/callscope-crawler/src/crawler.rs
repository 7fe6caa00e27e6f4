//! Breadth-first parallel crawl.

use std::collections::HashSet;

use rayon::prelude::*;
use tracing::{debug, trace, warn};

use crate::site::PageFetcher;

/// Outcome of a crawl.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlSummary {
    /// Pages downloaded and parsed.
    pub visited: usize,
    /// Pages that failed to download.
    pub failed: usize,
}

/// Crawl from `seed`, attempting at most `max_pages` downloads.
///
/// Each depth level is fetched in parallel on the current rayon pool. Links
/// are followed in the order they appear, so the set of pages attempted is
/// the same on every run.
pub fn crawl(fetcher: &dyn PageFetcher, seed: &str, max_pages: usize) -> CrawlSummary {
    let mut summary = CrawlSummary::default();
    let mut seen = HashSet::from([seed.to_string()]);
    let mut frontier = vec![seed.to_string()];
    let mut depth = 0;

    while !frontier.is_empty() {
        let budget = max_pages.saturating_sub(summary.visited + summary.failed);
        if budget == 0 {
            break;
        }
        frontier.truncate(budget);
        debug!(depth, pages = frontier.len(), "Crawling level");

        let results: Vec<_> = frontier
            .par_iter()
            .map(|url| {
                fetcher
                    .fetch(url)
                    .map(|page| {
                        trace!(url = %page.url, bytes = page.body.len(), "Fetched page");
                        fetcher.parse(&page)
                    })
                    .map_err(|err| (url, err))
            })
            .collect();

        let mut next = Vec::new();
        for result in results {
            match result {
                Ok(links) => {
                    summary.visited += 1;
                    next.extend(links.into_iter().filter(|link| seen.insert(link.clone())));
                }
                Err((url, err)) => {
                    summary.failed += 1;
                    warn!(%url, %err, "Fetch failed");
                }
            }
        }

        frontier = next;
        depth += 1;
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::{SimulatedFetcher, PAGE_PREFIX};
    use callscope_core::ManualClock;
    use callscope_profiler::Profiler;
    use std::time::Duration;
    use time::macros::datetime;

    fn seed() -> String {
        format!("{PAGE_PREFIX}0")
    }

    #[test]
    fn crawl_respects_page_budget() {
        let fetcher = SimulatedFetcher::new(Duration::ZERO);

        let summary = crawl(&fetcher, &seed(), 10);

        // Levels of 1, 2 and 4 pages, then p/7, p/8 and broken/3.
        assert_eq!(summary, CrawlSummary { visited: 9, failed: 1 });
    }

    #[test]
    fn crawl_stops_when_budget_is_zero() {
        let fetcher = SimulatedFetcher::new(Duration::ZERO);
        assert_eq!(crawl(&fetcher, &seed(), 0), CrawlSummary::default());
    }

    #[test]
    fn wrapped_crawl_reports_fetch_and_parse() {
        let profiler = Profiler::new(ManualClock::new(datetime!(2026-01-01 0:00 UTC)));
        let fetcher = profiler
            .wrap::<dyn PageFetcher>(Box::new(SimulatedFetcher::new(Duration::ZERO)))
            .unwrap();

        let summary = crawl(fetcher.as_ref(), &seed(), 10);
        assert_eq!(summary.visited + summary.failed, 10);

        let mut out = Vec::new();
        profiler.write_report(&mut out).unwrap();
        insta::assert_snapshot!(String::from_utf8(out).unwrap(), @r"
        Run at Thu, 1 Jan 2026 00:00:00 GMT
        callscope_crawler::site::PageFetcher#fetch took 0 (ms)
        callscope_crawler::site::PageFetcher#parse took 0 (ms)
        ");
    }
}
