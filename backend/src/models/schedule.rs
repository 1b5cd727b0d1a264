use serde::Serialize;

use super::time::TimePoint;

/// One job's name and its computed time interval.
///
/// Built by the schedule loader once every field of a row parsed; the fields
/// are read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleEntry {
    name: String,
    start: TimePoint,
    end: TimePoint,
}

impl ScheduleEntry {
    pub(crate) fn new(name: impl Into<String>, start: TimePoint, end: TimePoint) -> Self {
        Self {
            name: name.into(),
            start,
            end,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start(&self) -> TimePoint {
        self.start
    }

    pub fn end(&self) -> TimePoint {
        self.end
    }

    /// Signed length of the interval in seconds. Zero or negative for
    /// degenerate entries.
    pub fn duration_seconds(&self) -> i64 {
        self.end.seconds_since(self.start)
    }
}

/// Ordered entries of one load, in source-row order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Schedule {
    entries: Vec<ScheduleEntry>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, entry: ScheduleEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScheduleEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Earliest instant and latest instant touched by any entry.
    ///
    /// Degenerate entries count with both endpoints, so the span always
    /// covers every bar.
    pub fn span(&self) -> Option<(TimePoint, TimePoint)> {
        let mut iter = self.entries.iter();
        let first = iter.next()?;
        let init = (first.start.min(first.end), first.start.max(first.end));
        Some(iter.fold(init, |(lo, hi), e| {
            (lo.min(e.start).min(e.end), hi.max(e.start).max(e.end))
        }))
    }
}

impl IntoIterator for Schedule {
    type Item = ScheduleEntry;
    type IntoIter = std::vec::IntoIter<ScheduleEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a ScheduleEntry;
    type IntoIter = std::slice::Iter<'a, ScheduleEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
