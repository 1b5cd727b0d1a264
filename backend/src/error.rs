//! Error types for schedule loading.
//!
//! Every failure of a load is one of three kinds (format, unsupported format,
//! I/O) and carries an [`ErrorContext`] describing where it happened.

use std::fmt;
use std::path::Path;

/// Result type for schedule loading operations
pub type ScheduleResult<T> = Result<T, ScheduleError>;

/// Structured context for schedule errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// Source document path
    pub path: Option<String>,
    /// 0-based sheet row
    pub row: Option<u32>,
    /// 0-based sheet column
    pub column: Option<u32>,
    /// Additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context for a document path.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: Some(path.as_ref().display().to_string()),
            ..Default::default()
        }
    }

    /// Set the row index.
    pub fn with_row(mut self, row: u32) -> Self {
        self.row = Some(row);
        self
    }

    /// Set the column index.
    pub fn with_column(mut self, column: u32) -> Self {
        self.column = Some(column);
        self
    }

    /// Set additional details.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    fn merge(&mut self, other: ErrorContext) {
        if other.path.is_some() {
            self.path = other.path;
        }
        if other.row.is_some() {
            self.row = other.row;
        }
        if other.column.is_some() {
            self.column = other.column;
        }
        if other.details.is_some() {
            self.details = other.details;
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(ref path) = self.path {
            parts.push(format!("path={}", path));
        }
        if let Some(row) = self.row {
            parts.push(format!("row={}", row));
        }
        if let Some(column) = self.column {
            parts.push(format!("column={}", column));
        }
        if let Some(ref details) = self.details {
            parts.push(format!("details={}", details));
        }
        write!(f, "[{}]", parts.join(", "))
    }
}

/// Coarse error category, for callers that only need to branch on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Format,
    UnsupportedFormat,
    Io,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Format => "format error",
            ErrorKind::UnsupportedFormat => "unsupported format",
            ErrorKind::Io => "i/o failure",
        };
        f.write_str(name)
    }
}

/// Error type for schedule loading
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    /// A present field could not be parsed as its expected type.
    /// Aborts the whole load.
    #[error("Format error: {message} {context}")]
    FormatError {
        message: String,
        context: ErrorContext,
    },

    /// The format tag does not name a known source format.
    #[error("Unsupported format: '{tag}' {context}")]
    UnsupportedFormatError { tag: String, context: ErrorContext },

    /// The document could not be opened or read.
    #[error("I/O failure: {message} {context}")]
    IoFailure {
        message: String,
        context: ErrorContext,
    },
}

impl ScheduleError {
    /// Create a format error.
    pub fn format(message: impl Into<String>) -> Self {
        Self::FormatError {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Create an unsupported format error for a tag.
    pub fn unsupported(tag: impl Into<String>) -> Self {
        Self::UnsupportedFormatError {
            tag: tag.into(),
            context: ErrorContext::default(),
        }
    }

    /// Create an I/O failure.
    pub fn io(message: impl Into<String>) -> Self {
        Self::IoFailure {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// The kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::FormatError { .. } => ErrorKind::Format,
            Self::UnsupportedFormatError { .. } => ErrorKind::UnsupportedFormat,
            Self::IoFailure { .. } => ErrorKind::Io,
        }
    }

    /// Get the error context.
    pub fn context(&self) -> &ErrorContext {
        match self {
            Self::FormatError { context, .. }
            | Self::UnsupportedFormatError { context, .. }
            | Self::IoFailure { context, .. } => context,
        }
    }

    /// Merge `extra` into the error context. Fields set in `extra` win.
    pub fn with_context(mut self, extra: ErrorContext) -> Self {
        match &mut self {
            Self::FormatError { context, .. }
            | Self::UnsupportedFormatError { context, .. }
            | Self::IoFailure { context, .. } => context.merge(extra),
        }
        self
    }

    pub fn is_format(&self) -> bool {
        self.kind() == ErrorKind::Format
    }

    pub fn is_unsupported_format(&self) -> bool {
        self.kind() == ErrorKind::UnsupportedFormat
    }

    pub fn is_io(&self) -> bool {
        self.kind() == ErrorKind::Io
    }
}
