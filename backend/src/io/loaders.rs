use calamine::{open_workbook, Data, Ods, Range, Reader, Xlsx};
use log::{debug, info, warn};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::extractor::{RawRow, DURATION_COLUMN, START_COLUMN};
use super::format::SourceFormat;
use crate::config::{LoaderConfig, SheetSettings};
use crate::error::{ErrorContext, ScheduleError, ScheduleResult};
use crate::models::{Schedule, ScheduleEntry};
use crate::parsing::{DurationConverter, TimeParser};

/// Sheet read when an `ods` document does not override it.
pub const DEFAULT_ODS_SHEET: &str = "Sheet1";

/// Builds a [`Schedule`] from a spreadsheet.
///
/// Rows with an empty name, start or duration are skipped. The first row whose
/// fields are present but unparsable fails the whole load.
#[derive(Debug, Clone, Default)]
pub struct ScheduleBuilder {
    time_parser: TimeParser,
    durations: DurationConverter,
    sheets: SheetSettings,
}

impl ScheduleBuilder {
    pub fn new(config: &LoaderConfig) -> Self {
        Self {
            time_parser: config.time_parser(),
            durations: config.duration_converter(),
            sheets: config.sheets.clone(),
        }
    }

    pub fn time_parser(&self) -> &TimeParser {
        &self.time_parser
    }

    /// Load the schedule at `path` using the reader named by `format_tag`.
    pub fn build(&self, path: impl AsRef<Path>, format_tag: &str) -> ScheduleResult<Schedule> {
        let path = path.as_ref();
        let format: SourceFormat = format_tag
            .parse()
            .map_err(|e: ScheduleError| e.with_context(ErrorContext::new(path)))?;
        self.build_format(path, format)
    }

    /// Load the schedule at `path`, picking the reader from its extension.
    pub fn build_from_path(&self, path: impl AsRef<Path>) -> ScheduleResult<Schedule> {
        let path = path.as_ref();
        let format = SourceFormat::from_path(path)?;
        self.build_format(path, format)
    }

    /// Load the schedule at `path` as `format`.
    pub fn build_format(&self, path: &Path, format: SourceFormat) -> ScheduleResult<Schedule> {
        // the workbook is dropped inside read_sheet, before any row is parsed
        let sheet = match format {
            SourceFormat::Xlsx => {
                read_sheet::<Xlsx<BufReader<File>>>(path, self.sheet_selector(format))
            }
            SourceFormat::Ods => {
                read_sheet::<Ods<BufReader<File>>>(path, self.sheet_selector(format))
            }
        }
        .map_err(|e| e.with_context(ErrorContext::new(path)))?;

        let schedule = self
            .build_from_sheet(&sheet, format)
            .map_err(|e| e.with_context(ErrorContext::new(path)))?;

        info!(
            "Loaded {} schedule entries from {} ({})",
            schedule.len(),
            path.display(),
            format
        );
        Ok(schedule)
    }

    /// Run the row pipeline over an already loaded sheet.
    ///
    /// Row 0 is the header and is never read.
    pub fn build_from_sheet(
        &self,
        sheet: &Range<Data>,
        format: SourceFormat,
    ) -> ScheduleResult<Schedule> {
        let extractor = format.extractor();
        let mut schedule = Schedule::new();

        let Some((last_row, _)) = sheet.end() else {
            return Ok(schedule);
        };

        for row in 1..=last_row {
            let raw = extractor
                .extract_row(sheet, row)
                .map_err(|e| e.with_context(ErrorContext::default().with_row(row)))?;

            let Some(raw) = raw else {
                debug!("Row {}: absent, skipped", row);
                continue;
            };

            if let Some(field) = raw.missing_field() {
                debug!("Row {}: empty {}, skipped", row, field);
                continue;
            }

            let entry = self
                .parse_row(raw)
                .map_err(|e| e.with_context(ErrorContext::default().with_row(row)))?;
            schedule.push(entry);
        }

        Ok(schedule)
    }

    fn parse_row(&self, raw: RawRow) -> ScheduleResult<ScheduleEntry> {
        let start = self
            .time_parser
            .parse(&raw.start)
            .map_err(|e| e.with_context(ErrorContext::default().with_column(START_COLUMN)))?;
        let end = self
            .durations
            .to_end_time(start, &raw.duration)
            .map_err(|e| e.with_context(ErrorContext::default().with_column(DURATION_COLUMN)))?;

        Ok(ScheduleEntry::new(raw.name, start, end))
    }

    fn sheet_selector(&self, format: SourceFormat) -> SheetSelector<'_> {
        match (self.sheets.sheet_for(format), format) {
            (Some(name), _) => SheetSelector::Named(name),
            (None, SourceFormat::Ods) => SheetSelector::NamedOrFirst(DEFAULT_ODS_SHEET),
            (None, SourceFormat::Xlsx) => SheetSelector::First,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum SheetSelector<'a> {
    First,
    Named(&'a str),
    NamedOrFirst(&'a str),
}

fn read_sheet<R>(path: &Path, selector: SheetSelector<'_>) -> ScheduleResult<Range<Data>>
where
    R: Reader<BufReader<File>>,
    R::Error: std::fmt::Display,
{
    let mut workbook: R = open_workbook(path)
        .map_err(|e| ScheduleError::io(format!("Failed to open workbook: {}", e)))?;

    let sheet_names = workbook.sheet_names();
    let name = match selector {
        SheetSelector::Named(name) => {
            if !sheet_names.iter().any(|n| n == name) {
                return Err(ScheduleError::io(format!("Sheet '{}' not found", name)));
            }
            name.to_string()
        }
        SheetSelector::NamedOrFirst(name) if sheet_names.iter().any(|n| n == name) => {
            name.to_string()
        }
        SheetSelector::NamedOrFirst(name) => {
            let first = first_sheet(&sheet_names)?;
            warn!(
                "Sheet '{}' not found in {}, reading '{}' instead",
                name,
                path.display(),
                first
            );
            first
        }
        SheetSelector::First => first_sheet(&sheet_names)?,
    };

    workbook
        .worksheet_range(&name)
        .map_err(|e| ScheduleError::io(format!("Failed to read sheet '{}': {}", name, e)))
}

fn first_sheet(sheet_names: &[String]) -> ScheduleResult<String> {
    sheet_names
        .first()
        .cloned()
        .ok_or_else(|| ScheduleError::io("Workbook has no sheets"))
}
