use serde::{Deserialize, Serialize};

use crate::error::{ScheduleError, ScheduleResult};
use crate::models::TimePoint;

/// What to do with durations that would not move the end past the start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NegativeDurationPolicy {
    /// Keep the entry, even when `end <= start`.
    #[default]
    Allow,
    /// Fail the load on durations below zero.
    RejectNegative,
    /// Fail the load on durations of zero or below.
    RejectNonPositive,
}

impl NegativeDurationPolicy {
    fn check(&self, minutes: f64) -> ScheduleResult<()> {
        let rejected = match self {
            Self::Allow => false,
            Self::RejectNegative => minutes < 0.0,
            Self::RejectNonPositive => minutes <= 0.0,
        };
        if rejected {
            return Err(ScheduleError::format(format!(
                "duration of {} minutes rejected by {:?} policy",
                minutes, self
            )));
        }
        Ok(())
    }
}

/// Converts a textual duration in minutes into an end time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DurationConverter {
    policy: NegativeDurationPolicy,
}

impl DurationConverter {
    pub fn new(policy: NegativeDurationPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> NegativeDurationPolicy {
        self.policy
    }

    /// Parse a decimal number of minutes (`"45"`, `"12.5"`).
    pub fn parse_minutes(text: &str) -> ScheduleResult<f64> {
        let trimmed = text.trim();
        let minutes: f64 = trimmed.parse().map_err(|_| {
            ScheduleError::format(format!("'{}' is not a number of minutes", text))
        })?;
        if !minutes.is_finite() {
            return Err(ScheduleError::format(format!(
                "'{}' is not a finite number of minutes",
                text
            )));
        }
        Ok(minutes)
    }

    /// Compute `start + round(minutes * 60)` seconds.
    pub fn to_end_time(&self, start: TimePoint, duration_text: &str) -> ScheduleResult<TimePoint> {
        let minutes = Self::parse_minutes(duration_text)?;
        self.policy.check(minutes)?;

        let seconds = (minutes * 60.0).round();
        // the i64 cast below saturates past this bound
        if seconds.abs() >= i64::MAX as f64 {
            return Err(ScheduleError::format(format!(
                "duration of {} minutes is out of range",
                minutes
            )));
        }

        start.checked_add_seconds(seconds as i64).ok_or_else(|| {
            ScheduleError::format(format!(
                "end time for {} minutes after {} is out of range",
                minutes, start
            ))
        })
    }
}
