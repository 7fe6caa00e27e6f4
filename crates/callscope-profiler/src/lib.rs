//! Call profiling for trait objects.
//!
//! This crate wraps implementations of a trait in a forwarding proxy that
//! measures how long selected methods take. Totals are aggregated per method
//! across every wrapped instance and thread, and written out as a plain text
//! report on demand.
//!
//! # Usage
//!
//! Declare the interface with the methods to time marked `#[profiled]`:
//!
//! ```ignore
//! callscope_profiler::profiled_interface! {
//!     pub trait PageFetcher {
//!         #[profiled]
//!         fn fetch(&self, url: &str) -> Result<Page, FetchError>;
//!         fn name(&self) -> String;
//!     }
//! }
//! ```
//!
//! Wrap an implementation and use it as usual:
//!
//! ```ignore
//! use callscope_core::SystemClock;
//! use callscope_profiler::Profiler;
//!
//! let profiler = Profiler::new(SystemClock::new());
//! let fetcher = profiler.wrap::<dyn PageFetcher>(Box::new(HttpFetcher::new()))?;
//! fetcher.fetch("https://example.com")?;
//! ```
//!
//! At the end of the run, append the report to a file:
//!
//! ```ignore
//! profiler.write_report_to_path("profile.txt")?;
//! ```

mod collector;
mod config;
mod interceptor;
mod macros;
mod method;
mod profiler;

// Re-export public API
pub use collector::MethodTiming;
pub use config::{ProfilerConfig, TimeUnit};
pub use interceptor::Interceptor;
pub use method::{InterfaceDescriptor, MethodDescriptor, MethodId};
pub use profiler::{Interface, Profiler};
