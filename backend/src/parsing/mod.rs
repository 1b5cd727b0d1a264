//! Field parsers for schedule rows.
//!
//! - [`time_parser`]: clock-time text into an anchored [`TimePoint`](crate::models::TimePoint)
//! - [`duration`]: decimal minutes into an end time
//!
//! # Example
//!
//! ```
//! use jsv_rust::parsing::{DurationConverter, TimeParser};
//!
//! let start = TimeParser::default().parse("09:00:00").unwrap();
//! let end = DurationConverter::default().to_end_time(start, "45").unwrap();
//! assert_eq!(end.seconds_since(start), 45 * 60);
//! ```

pub mod duration;
pub mod time_parser;


pub use duration::{DurationConverter, NegativeDurationPolicy};
pub use time_parser::TimeParser;
