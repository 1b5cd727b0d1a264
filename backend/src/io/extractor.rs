//! Row extraction over loaded sheets.
//!
//! Both source formats share one fixed column layout. An extractor turns the
//! three relevant cells of a row into display text; interpreting that text is
//! left to the loader.

use calamine::{Data, Range};

use crate::error::{ErrorContext, ScheduleError, ScheduleResult};

/// Column holding the job name.
pub const NAME_COLUMN: u32 = 0;
/// Column holding the duration in minutes.
pub const DURATION_COLUMN: u32 = 4;
/// Column holding the start time.
pub const START_COLUMN: u32 = 5;

/// Display text of the three schedule columns of one row. Empty where the
/// sheet has no content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    pub name: String,
    pub start: String,
    pub duration: String,
}

impl RawRow {
    /// Name of the first empty required field, if any.
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.name.is_empty() {
            Some("name")
        } else if self.start.is_empty() {
            Some("start")
        } else if self.duration.is_empty() {
            Some("duration")
        } else {
            None
        }
    }
}

/// Reads cells of a sheet as text.
pub trait RowExtractor: Send + Sync {
    /// Text of the cell at absolute `(row, column)`, empty when absent.
    fn cell_text(&self, sheet: &Range<Data>, row: u32, column: u32) -> ScheduleResult<String>;

    /// Extract the schedule columns of `row`, `None` when the row has no
    /// populated cell at all.
    fn extract_row(&self, sheet: &Range<Data>, row: u32) -> ScheduleResult<Option<RawRow>> {
        if row_is_absent(sheet, row) {
            return Ok(None);
        }

        Ok(Some(RawRow {
            name: self.cell_text(sheet, row, NAME_COLUMN)?,
            start: self.cell_text(sheet, row, START_COLUMN)?,
            duration: self.cell_text(sheet, row, DURATION_COLUMN)?,
        }))
    }
}

fn row_is_absent(sheet: &Range<Data>, row: u32) -> bool {
    let (Some((first_row, first_col)), Some((last_row, last_col))) = (sheet.start(), sheet.end())
    else {
        return true;
    };
    if row < first_row || row > last_row {
        return true;
    }
    (first_col..=last_col).all(|col| is_blank(sheet, row, col))
}

fn is_blank(sheet: &Range<Data>, row: u32, column: u32) -> bool {
    matches!(sheet.get_value((row, column)), None | Some(Data::Empty))
}

/// Typed-cell extractor for `xlsx` workbooks.
///
/// Text and numeric cells convert to text; any other populated cell type is an
/// access failure reported as a format error. A row missing any of its three
/// schedule cells is returned without converting the others, so it is skipped
/// even when one of them holds an unreadable type.
#[derive(Debug, Clone, Copy, Default)]
pub struct CellExtractor;

impl RowExtractor for CellExtractor {
    fn extract_row(&self, sheet: &Range<Data>, row: u32) -> ScheduleResult<Option<RawRow>> {
        if row_is_absent(sheet, row) {
            return Ok(None);
        }

        let incomplete = [NAME_COLUMN, START_COLUMN, DURATION_COLUMN]
            .into_iter()
            .any(|col| is_blank(sheet, row, col));
        if incomplete {
            let text = |col| {
                sheet
                    .get_value((row, col))
                    .map(display_text)
                    .unwrap_or_default()
            };
            return Ok(Some(RawRow {
                name: text(NAME_COLUMN),
                start: text(START_COLUMN),
                duration: text(DURATION_COLUMN),
            }));
        }

        Ok(Some(RawRow {
            name: self.cell_text(sheet, row, NAME_COLUMN)?,
            start: self.cell_text(sheet, row, START_COLUMN)?,
            duration: self.cell_text(sheet, row, DURATION_COLUMN)?,
        }))
    }

    fn cell_text(&self, sheet: &Range<Data>, row: u32, column: u32) -> ScheduleResult<String> {
        match sheet.get_value((row, column)) {
            None | Some(Data::Empty) => Ok(String::new()),
            Some(Data::String(s)) => Ok(s.clone()),
            Some(Data::Float(f)) => Ok(f.to_string()),
            Some(Data::Int(i)) => Ok(i.to_string()),
            Some(other) => Err(ScheduleError::FormatError {
                message: "cell type cannot be read as text".to_string(),
                context: ErrorContext::default()
                    .with_row(row)
                    .with_column(column)
                    .with_details(format!("{:?}", other)),
            }),
        }
    }
}

/// Display-text extractor for `ods` spreadsheets.
///
/// Every cell renders to the text a spreadsheet application would show for
/// it by default; this never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisplayTextExtractor;

impl RowExtractor for DisplayTextExtractor {
    fn cell_text(&self, sheet: &Range<Data>, row: u32, column: u32) -> ScheduleResult<String> {
        Ok(sheet
            .get_value((row, column))
            .map(display_text)
            .unwrap_or_default())
    }
}

/// Rendered text of a cell.
pub fn display_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(true) => "TRUE".to_string(),
        Data::Bool(false) => "FALSE".to_string(),
        Data::DurationIso(iso) => render_iso_duration(iso).unwrap_or_else(|| iso.clone()),
        other => other.to_string(),
    }
}

/// Render an ISO 8601 duration (`PT09H30M00S`, `P1DT2H`) as `HH:MM:SS`.
///
/// Days fold into the hour count. Returns `None` for text that is not a
/// non-negative ISO duration.
pub fn render_iso_duration(iso: &str) -> Option<String> {
    let rest = iso.strip_prefix('P')?;
    let (days, time) = rest.split_once('T').unwrap_or((rest, ""));

    let mut total = match days {
        "" => 0.0,
        d => d.strip_suffix('D')?.parse::<u64>().ok()? as f64 * 86_400.0,
    };

    let mut number = String::new();
    for ch in time.chars() {
        let unit = match ch {
            'H' => 3_600.0,
            'M' => 60.0,
            'S' => 1.0,
            c if c.is_ascii_digit() || c == '.' => {
                number.push(c);
                continue;
            }
            _ => return None,
        };
        total += number.parse::<f64>().ok()? * unit;
        number.clear();
    }
    if !number.is_empty() {
        return None;
    }

    let secs = total.round() as u64;
    Some(format!(
        "{:02}:{:02}:{:02}",
        secs / 3_600,
        (secs % 3_600) / 60,
        secs % 60
    ))
}
