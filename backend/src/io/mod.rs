//! Spreadsheet loading.
//!
//! Combines format detection, per-format row extraction and field parsing into
//! a [`Schedule`](crate::models::Schedule).
//!
//! # Example
//!
//! ```no_run
//! use jsv_rust::io::ScheduleBuilder;
//!
//! let schedule = ScheduleBuilder::default()
//!     .build("jobs.xlsx", "xlsx")
//!     .expect("Failed to load");
//! println!("Loaded {} jobs", schedule.len());
//! ```

pub mod extractor;
pub mod format;
pub mod loaders;


pub use extractor::{
    CellExtractor, DisplayTextExtractor, RawRow, RowExtractor, DURATION_COLUMN, NAME_COLUMN,
    START_COLUMN,
};
pub use format::SourceFormat;
pub use loaders::ScheduleBuilder;
