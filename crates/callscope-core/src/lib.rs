//! Core types and traits for the callscope call profiler.
//!
//! This crate provides the foundational pieces shared by the profiler and the
//! applications that use it:
//! - Error types
//! - Injectable clock sources
//! - Report timestamp formatting

pub mod clock;
pub mod error;
pub mod timestamp;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{Error, Result};
pub use timestamp::format_rfc1123;
