//! Provenance tags and the time source they are dated from.

use chrono::{Local, NaiveDate};
use std::fmt;

/// Label recorded as the author of every rewrite
pub const ATTRIBUTOR: &str = "Pwc";

/// Source of the calendar date stamped into provenance tags
pub trait Clock: Send + Sync {
    /// Current calendar date
    fn today(&self) -> NaiveDate;
}

/// Reads the local wall-clock date
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always reports the same date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    date: NaiveDate,
}

impl FixedClock {
    /// Create a clock pinned to `date`
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.date
    }
}

/// Comment appended after each rewritten fragment.
///
/// Rendered as `"Added By Pwc YYYY-MM-DD,`; the leading double quote opens an
/// end-of-line comment in the target dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvenanceTag {
    text: String,
}

impl ProvenanceTag {
    /// Build the tag for the given date
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            text: format!("\"Added By {} {},", ATTRIBUTOR, date.format("%Y-%m-%d")),
        }
    }

    /// Build the tag for today's date as reported by `clock`
    pub fn from_clock(clock: &dyn Clock) -> Self {
        Self::for_date(clock.today())
    }

    /// The rendered tag
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for ProvenanceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
