//! Profiler facade.

use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use callscope_core::{format_rfc1123, Clock, Error, Result};
use time::OffsetDateTime;

use crate::collector::{Collector, MethodTiming};
use crate::config::ProfilerConfig;
use crate::interceptor::Interceptor;
use crate::method::{InterfaceDescriptor, MethodId};

/// A trait object type that can be wrapped by a [`Profiler`].
///
/// Implemented for `dyn Trait` by [`crate::profiled_interface!`].
pub trait Interface {
    /// Static description of the trait's methods.
    fn descriptor() -> &'static InterfaceDescriptor;

    /// Build a forwarding proxy that routes calls through `interceptor`.
    fn proxy(delegate: Box<Self>, interceptor: Interceptor) -> Box<Self>;
}

/// Times calls made through wrapped instances and reports the totals.
///
/// Every instance returned by [`Profiler::wrap`] shares this profiler's
/// totals, so calls to the same method aggregate across instances and
/// threads.
pub struct Profiler {
    clock: Arc<dyn Clock>,
    collector: Arc<Collector>,
    config: ProfilerConfig,
    started_at: OffsetDateTime,
}

impl Profiler {
    /// Create a profiler with the default configuration.
    pub fn new(clock: impl Clock + 'static) -> Self {
        Self::with_config(clock, ProfilerConfig::default())
    }

    /// Create a profiler with a custom configuration.
    ///
    /// The run start time is read from `clock` here and never again.
    pub fn with_config(clock: impl Clock + 'static, config: ProfilerConfig) -> Self {
        let started_at = clock.now();
        Self {
            clock: Arc::new(clock),
            collector: Arc::new(Collector::new()),
            config,
            started_at,
        }
    }

    /// Wrap `delegate` so its profiled methods are timed.
    ///
    /// Fails with [`Error::InvalidTarget`] if the interface declares no
    /// profiled methods.
    pub fn wrap<I: Interface + ?Sized>(&self, delegate: Box<I>) -> Result<Box<I>> {
        let descriptor = I::descriptor();
        if !descriptor.has_profiled_methods() {
            return Err(Error::InvalidTarget(descriptor.path().to_string()));
        }

        tracing::debug!(
            interface = descriptor.path(),
            profiled = descriptor.profiled_methods().count(),
            "Wrapped delegate"
        );

        let interceptor = Interceptor::new(
            descriptor,
            Arc::clone(&self.collector),
            Arc::clone(&self.clock),
        );
        Ok(I::proxy(delegate, interceptor))
    }

    /// When this profiler was created.
    #[must_use]
    pub const fn started_at(&self) -> OffsetDateTime {
        self.started_at
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &ProfilerConfig {
        &self.config
    }

    /// Total time recorded for a method so far.
    #[must_use]
    pub fn total(&self, method: &MethodId) -> Option<Duration> {
        self.collector.total(method)
    }

    /// Totals for every method called so far, in report order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<MethodTiming> {
        self.collector.snapshot()
    }

    /// Write the report to `sink`.
    ///
    /// The report is a `Run at <timestamp>` header, one line per profiled
    /// method, and a trailing blank line. Recorded totals are not modified.
    pub fn write_report<W: Write + ?Sized>(&self, sink: &mut W) -> Result<()> {
        let started = format_rfc1123(self.started_at)?;
        writeln!(sink, "Run at {started}")?;
        self.collector.render(sink, self.config.unit)?;
        writeln!(sink)?;
        Ok(())
    }

    /// Append the report to the file at `path`, creating it if needed.
    pub fn write_report_to_path(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let mut writer = BufWriter::new(file);
        self.write_report(&mut writer)?;
        writer.flush()?;

        tracing::debug!(path = %path.display(), methods = self.collector.len(), "Wrote profiling report");
        Ok(())
    }
}
