use chrono::{NaiveDate, NaiveTime, Timelike};

use crate::error::{ScheduleError, ScheduleResult};
use crate::models::{TimeFormat, TimePoint};

/// Default reference date for clock times (the Unix epoch date).
pub fn default_anchor_date() -> NaiveDate {
    NaiveDate::default()
}

/// Parses clock-time text into a [`TimePoint`] on a fixed anchor date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeParser {
    format: TimeFormat,
    anchor: NaiveDate,
}

impl TimeParser {
    pub fn new(format: TimeFormat, anchor: NaiveDate) -> Self {
        Self { format, anchor }
    }

    pub fn format(&self) -> &TimeFormat {
        &self.format
    }

    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    /// Parse `text`, which must match the pattern exactly.
    ///
    /// Text that chrono would accept but that does not format back to the same
    /// string (`9:30:00` for `%H:%M:%S`) is rejected, as are leap seconds.
    pub fn parse(&self, text: &str) -> ScheduleResult<TimePoint> {
        if text.is_empty() {
            return Err(ScheduleError::format("empty time value"));
        }

        let time = NaiveTime::parse_from_str(text, self.format.pattern()).map_err(|e| {
            ScheduleError::format(format!(
                "'{}' does not match time format {}: {}",
                text, self.format, e
            ))
        })?;

        if time.nanosecond() >= 1_000_000_000 {
            return Err(ScheduleError::format(format!(
                "'{}' is a leap second",
                text
            )));
        }

        if self.format.format_time(time) != text {
            return Err(ScheduleError::format(format!(
                "'{}' does not match time format {} exactly",
                text, self.format
            )));
        }

        Ok(TimePoint::on(self.anchor, time))
    }
}

impl Default for TimeParser {
    fn default() -> Self {
        Self::new(TimeFormat::default(), default_anchor_date())
    }
}
