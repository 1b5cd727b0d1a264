use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::models::{Schedule, TimeFormat, TimePoint};

// =========================================================
// Gantt chart types
// =========================================================

/// Chart title.
pub const CHART_TITLE: &str = "Job Schedule Visualizer";
/// Name of the single series every entry is grouped under.
pub const SERIES_NAME: &str = "Jobs";
/// Category axis label.
pub const CATEGORY_AXIS_LABEL: &str = "Jobs";
/// Time axis label.
pub const TIME_AXIS_LABEL: &str = "Time";
/// Upper bound on generated axis ticks; the step widens past it.
pub const MAX_TICKS: u32 = 200;

/// Turns a schedule into a displayable chart object.
pub trait ScheduleRenderer {
    type Output;

    fn render(&self, schedule: &Schedule) -> Self::Output;
}

/// Calendar unit of a tick step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickUnitType {
    Minute,
    Hour,
}

/// Spacing between two time-axis ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickUnit {
    pub unit: TickUnitType,
    pub multiple: u32,
}

impl TickUnit {
    pub fn hours(multiple: u32) -> Self {
        Self {
            unit: TickUnitType::Hour,
            multiple,
        }
    }

    pub fn minutes(multiple: u32) -> Self {
        Self {
            unit: TickUnitType::Minute,
            multiple,
        }
    }

    /// Step length in seconds, at least one.
    pub fn seconds(&self) -> i64 {
        let unit = match self.unit {
            TickUnitType::Minute => 60,
            TickUnitType::Hour => 3_600,
        };
        unit * i64::from(self.multiple.max(1))
    }
}

impl Default for TickUnit {
    fn default() -> Self {
        Self::hours(1)
    }
}

/// One bar of the chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GanttTask {
    pub name: String,
    pub start: TimePoint,
    pub end: TimePoint,
    pub start_label: String,
    pub end_label: String,
}

/// Named group of bars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GanttSeries {
    pub name: String,
    pub tasks: Vec<GanttTask>,
}

/// Labelled axis tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AxisTick {
    pub at: TimePoint,
    pub label: String,
}

/// Time (value) axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeAxis {
    pub label: String,
    /// Tick label pattern, e.g. `HH:mm:ss`
    pub format: String,
    pub tick_unit: TickUnit,
    pub lower: Option<TimePoint>,
    pub upper: Option<TimePoint>,
    pub ticks: Vec<AxisTick>,
}

/// Gantt chart dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GanttChart {
    pub title: String,
    pub category_axis_label: String,
    pub series: Vec<GanttSeries>,
    pub time_axis: TimeAxis,
}

impl GanttChart {
    /// Bars of all series, in order.
    pub fn tasks(&self) -> impl Iterator<Item = &GanttTask> {
        self.series.iter().flat_map(|s| s.tasks.iter())
    }
}

/// Builds [`GanttChart`]s with a fixed time format and tick unit.
#[derive(Debug, Clone, Default)]
pub struct GanttRenderer {
    format: TimeFormat,
    tick_unit: TickUnit,
}

impl GanttRenderer {
    pub fn new(format: TimeFormat) -> Self {
        Self {
            format,
            tick_unit: TickUnit::default(),
        }
    }

    pub fn with_tick_unit(mut self, tick_unit: TickUnit) -> Self {
        self.tick_unit = tick_unit;
        self
    }

    pub fn format(&self) -> &TimeFormat {
        &self.format
    }

    fn task(&self, name: &str, start: TimePoint, end: TimePoint) -> GanttTask {
        GanttTask {
            name: name.to_string(),
            start,
            end,
            start_label: start.format(&self.format),
            end_label: end.format(&self.format),
        }
    }

    fn axis(&self, span: Option<(TimePoint, TimePoint)>) -> TimeAxis {
        let mut axis = TimeAxis {
            label: TIME_AXIS_LABEL.to_string(),
            format: self.format.label(),
            tick_unit: self.tick_unit,
            lower: None,
            upper: None,
            ticks: Vec::new(),
        };

        let Some((lower, upper)) = span else {
            return axis;
        };

        // ticks are aligned to the step, counted from midnight of the first day
        let midnight = TimePoint::on(lower.date(), NaiveTime::MIN);
        let from = lower.seconds_since(midnight);
        let to = upper.seconds_since(midnight);

        let mut step = self.tick_unit.seconds();
        let first = from.div_euclid(step) * step;
        let count = (to - first).div_euclid(step) + 1;
        if count > i64::from(MAX_TICKS) {
            step *= (count + i64::from(MAX_TICKS) - 1) / i64::from(MAX_TICKS);
        }
        let first = from.div_euclid(step) * step;

        let mut offset = first;
        while offset <= to {
            if let Some(at) = midnight.checked_add_seconds(offset) {
                axis.ticks.push(AxisTick {
                    at,
                    label: at.format(&self.format),
                });
            }
            offset += step;
        }

        axis.lower = Some(lower);
        axis.upper = Some(upper);
        axis
    }
}

impl ScheduleRenderer for GanttRenderer {
    type Output = GanttChart;

    fn render(&self, schedule: &Schedule) -> GanttChart {
        let tasks = schedule
            .iter()
            .map(|e| self.task(e.name(), e.start(), e.end()))
            .collect();

        GanttChart {
            title: CHART_TITLE.to_string(),
            category_axis_label: CATEGORY_AXIS_LABEL.to_string(),
            series: vec![GanttSeries {
                name: SERIES_NAME.to_string(),
                tasks,
            }],
            time_axis: self.axis(schedule.span()),
        }
    }
}
