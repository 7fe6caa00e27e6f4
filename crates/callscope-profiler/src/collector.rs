//! Per-method duration aggregation.

use std::collections::BTreeMap;
use std::io::Write;
use std::time::Duration;

use parking_lot::Mutex;

use crate::config::TimeUnit;
use crate::method::MethodId;

/// Accumulated time spent in one method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodTiming {
    /// Method the time was spent in.
    pub method: MethodId,
    /// Sum of every recorded call.
    pub total: Duration,
}

/// Collects and aggregates call durations.
///
/// Entries are created on the first recorded call and only ever grow. The
/// map is ordered by [`MethodId`], which fixes the order of report lines.
#[derive(Debug, Default)]
pub struct Collector {
    totals: Mutex<BTreeMap<MethodId, Duration>>,
}

impl Collector {
    /// Create an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a call duration to the running total for `method`.
    pub fn record(&self, method: MethodId, duration: Duration) {
        let mut totals = self.totals.lock();
        let total = totals.entry(method).or_default();
        *total = total.saturating_add(duration);
    }

    /// Total recorded for a method, if it was ever called.
    #[must_use]
    pub fn total(&self, method: &MethodId) -> Option<Duration> {
        self.totals.lock().get(method).copied()
    }

    /// Number of methods with at least one recorded call.
    #[must_use]
    pub fn len(&self) -> usize {
        self.totals.lock().len()
    }

    /// Whether nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.totals.lock().is_empty()
    }

    /// Get a consistent copy of all totals in report order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<MethodTiming> {
        self.totals
            .lock()
            .iter()
            .map(|(&method, &total)| MethodTiming { method, total })
            .collect()
    }

    /// Write one `<method> took <n> (<unit>)` line per method.
    ///
    /// The lock is only held while taking the snapshot, not while writing.
    pub fn render<W: Write + ?Sized>(&self, sink: &mut W, unit: TimeUnit) -> std::io::Result<()> {
        for timing in self.snapshot() {
            writeln!(
                sink,
                "{} took {} ({})",
                timing.method,
                unit.count(timing.total),
                unit.label()
            )?;
        }
        Ok(())
    }
}
