use chrono::format::{Item, StrftimeItems};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default clock-time pattern (`HH:mm:ss`, 24-hour).
pub const DEFAULT_TIME_PATTERN: &str = "%H:%M:%S";

/// Immutable clock-time pattern shared by parsing and chart rendering.
///
/// Holds a chrono strftime pattern. The pattern is validated on construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeFormat(String);

impl TimeFormat {
    /// Create a time format from a strftime pattern.
    pub fn new(pattern: impl Into<String>) -> Result<Self, String> {
        let pattern = pattern.into();
        if pattern.is_empty() {
            return Err("time format pattern is empty".to_string());
        }
        if StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error)) {
            return Err(format!("invalid time format pattern: '{}'", pattern));
        }
        Ok(Self(pattern))
    }

    /// The strftime pattern.
    pub fn pattern(&self) -> &str {
        &self.0
    }

    /// Human-readable form of the pattern, e.g. `HH:mm:ss`.
    pub fn label(&self) -> String {
        self.0
            .replace("%H", "HH")
            .replace("%M", "mm")
            .replace("%S", "ss")
    }

    /// Format a clock time with this pattern.
    pub fn format_time(&self, time: NaiveTime) -> String {
        time.format(&self.0).to_string()
    }
}

impl Default for TimeFormat {
    fn default() -> Self {
        Self(DEFAULT_TIME_PATTERN.to_string())
    }
}

impl TryFrom<String> for TimeFormat {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TimeFormat> for String {
    fn from(value: TimeFormat) -> Self {
        value.0
    }
}

impl fmt::Display for TimeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Absolute point in time with second resolution.
///
/// Clock times from a schedule are anchored on one reference date per load,
/// so arithmetic and ordering across rows are consistent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimePoint(NaiveDateTime);

impl TimePoint {
    /// Create a time point from a naive date-time.
    pub fn new(datetime: NaiveDateTime) -> Self {
        Self(datetime)
    }

    /// Anchor a clock time on `date`.
    pub fn on(date: NaiveDate, time: NaiveTime) -> Self {
        Self(date.and_time(time))
    }

    pub fn datetime(&self) -> NaiveDateTime {
        self.0
    }

    pub fn date(&self) -> NaiveDate {
        self.0.date()
    }

    pub fn time(&self) -> NaiveTime {
        self.0.time()
    }

    /// Shift by a number of seconds, `None` when out of the calendar range.
    pub fn checked_add_seconds(&self, seconds: i64) -> Option<Self> {
        let delta = TimeDelta::try_seconds(seconds)?;
        self.0.checked_add_signed(delta).map(Self)
    }

    /// Signed number of whole seconds from `earlier` to `self`.
    pub fn seconds_since(&self, earlier: TimePoint) -> i64 {
        self.0.signed_duration_since(earlier.0).num_seconds()
    }

    /// Format the clock-time part with `format`.
    pub fn format(&self, format: &TimeFormat) -> String {
        format.format_time(self.time())
    }
}

impl From<NaiveDateTime> for TimePoint {
    fn from(v: NaiveDateTime) -> Self {
        TimePoint::new(v)
    }
}

impl fmt::Display for TimePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M:%S"))
    }
}
