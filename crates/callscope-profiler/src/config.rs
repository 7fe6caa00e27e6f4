//! Profiler configuration.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use callscope_core::Error;

/// Unit durations are reported in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    /// Nanoseconds (`ns`).
    Nanoseconds,
    /// Microseconds (`us`).
    Microseconds,
    /// Milliseconds (`ms`).
    #[default]
    Milliseconds,
    /// Seconds (`s`).
    Seconds,
}

impl TimeUnit {
    /// Short label printed after each reported duration.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Nanoseconds => "ns",
            Self::Microseconds => "us",
            Self::Milliseconds => "ms",
            Self::Seconds => "s",
        }
    }

    /// Whole number of units in `duration`, truncated.
    #[must_use]
    pub const fn count(self, duration: Duration) -> u128 {
        match self {
            Self::Nanoseconds => duration.as_nanos(),
            Self::Microseconds => duration.as_micros(),
            Self::Milliseconds => duration.as_millis(),
            Self::Seconds => duration.as_secs() as u128,
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TimeUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ns" | "nanos" | "nanoseconds" => Ok(Self::Nanoseconds),
            "us" | "micros" | "microseconds" => Ok(Self::Microseconds),
            "ms" | "millis" | "milliseconds" => Ok(Self::Milliseconds),
            "s" | "secs" | "seconds" => Ok(Self::Seconds),
            _ => Err(Error::UnknownTimeUnit(s.to_string())),
        }
    }
}

/// Profiler configuration.
#[derive(Debug, Clone, Default)]
pub struct ProfilerConfig {
    /// Unit used for every duration in the report.
    pub unit: TimeUnit,
}

impl ProfilerConfig {
    /// Set the report time unit.
    #[must_use]
    pub const fn with_unit(mut self, unit: TimeUnit) -> Self {
        self.unit = unit;
        self
    }
}
