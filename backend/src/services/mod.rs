//! Visualization services.
//!
//! Turns a loaded [`Schedule`](crate::models::Schedule) into chart data:
//! [`gantt`] builds the serialisable chart model, [`text_chart`] draws it for
//! terminals.

pub mod gantt;
pub mod text_chart;


pub use gantt::{
    AxisTick, GanttChart, GanttRenderer, GanttSeries, GanttTask, ScheduleRenderer, TickUnit,
    TickUnitType, TimeAxis,
};
pub use text_chart::TextGantt;
