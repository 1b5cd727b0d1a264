use std::fmt;
use std::path::Path;
use std::str::FromStr;

use super::extractor::{CellExtractor, DisplayTextExtractor, RowExtractor};
use crate::error::{ErrorContext, ScheduleError, ScheduleResult};

/// Source document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    /// Office Open XML workbook, read cell by cell with native typing
    Xlsx,
    /// OpenDocument spreadsheet, read as rendered display text
    Ods,
}

impl FromStr for SourceFormat {
    type Err = ScheduleError;

    /// Parse a format tag (`"xlsx"`, `"ods"`, case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "xlsx" => Ok(Self::Xlsx),
            "ods" => Ok(Self::Ods),
            _ => Err(ScheduleError::unsupported(s)),
        }
    }
}

impl SourceFormat {
    /// Detect the format from a file extension.
    pub fn from_path(path: impl AsRef<Path>) -> ScheduleResult<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();

        extension
            .parse()
            .map_err(|e: ScheduleError| e.with_context(ErrorContext::new(path)))
    }

    /// The format tag, also the usual file extension.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Ods => "ods",
        }
    }

    /// Row extractor for documents of this format.
    pub fn extractor(&self) -> &'static dyn RowExtractor {
        match self {
            Self::Xlsx => &CellExtractor,
            Self::Ods => &DisplayTextExtractor,
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
