use std::path::PathBuf;

use thiserror::Error;

/// Coarse grouping of failures, used by the CLI when reporting a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input could not be located, opened or mapped to the expected columns.
    Input,
    /// A row carried missing or non-numeric data.
    MalformedRecord,
    /// The document could not be built or written to storage.
    RenderFailure,
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Meta Ads CSV file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("expected a .csv file, got: {0}")]
    InvalidFileType(String),

    #[error("CSV file is empty: {}", .0.display())]
    EmptyFile(PathBuf),

    #[error("missing required columns in CSV: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("invalid CSV format: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed record {row}: {reason}")]
    MalformedRecord { row: usize, reason: String },

    #[error("failed to render workbook: {0}")]
    Render(#[from] rust_xlsxwriter::XlsxError),

    #[error("failed to write report to {}: {}", .path.display(), .source)]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ReportError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReportError::FileNotFound(_)
            | ReportError::InvalidFileType(_)
            | ReportError::EmptyFile(_)
            | ReportError::MissingColumns(_)
            | ReportError::Csv(_) => ErrorKind::Input,
            ReportError::MalformedRecord { .. } => ErrorKind::MalformedRecord,
            ReportError::Render(_) | ReportError::Write { .. } => ErrorKind::RenderFailure,
        }
    }

    pub(crate) fn malformed(row: usize, reason: impl Into<String>) -> Self {
        ReportError::MalformedRecord {
            row,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
