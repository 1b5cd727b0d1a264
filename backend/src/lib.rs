//! # Job Schedule Visualizer
//!
//! Loads job schedules from spreadsheets and turns them into Gantt chart data.
//!
//! A schedule sheet carries one job per row after a header row: the job name in
//! column A, its duration in minutes in column E and its clock start time in
//! column F. Every row becomes a [`ScheduleEntry`] with an absolute start and
//! end, in row order.
//!
//! ## Architecture
//!
//! - [`parsing`]: clock time and duration conversion
//! - [`io`]: spreadsheet formats, cell extraction and the schedule builder
//! - [`models`]: schedule domain types
//! - [`services`]: chart model and text rendering
//! - [`config`]: `jsv.toml` loader settings
//! - [`error`]: error taxonomy shared by all of the above
//!
//! ## Example
//!
//! ```no_run
//! use jsv_rust::{GanttRenderer, ScheduleBuilder, ScheduleRenderer};
//!
//! let schedule = ScheduleBuilder::default().build("jobs.ods", "ods")?;
//! let chart = GanttRenderer::default().render(&schedule);
//! println!("{}", serde_json::to_string_pretty(&chart)?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// ScheduleError carries its context inline
#![allow(clippy::result_large_err)]

pub mod config;
pub mod error;
pub mod io;
pub mod models;
pub mod parsing;
pub mod services;

pub use config::{ConfigError, LoaderConfig};
pub use error::{ErrorContext, ErrorKind, ScheduleError, ScheduleResult};
pub use io::{ScheduleBuilder, SourceFormat};
pub use models::{Schedule, ScheduleEntry, TimeFormat, TimePoint};
pub use parsing::{DurationConverter, NegativeDurationPolicy, TimeParser};
pub use services::{GanttChart, GanttRenderer, ScheduleRenderer, TextGantt};
