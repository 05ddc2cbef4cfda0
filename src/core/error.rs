// errors from loading workbooks and writing reports; resolution itself never fails

use thiserror::Error;

pub type LineageResult<T> = Result<T, LineageError>;

#[derive(Debug, Error)]
pub enum LineageError {
    /// A sheet the requested operation depends on is absent.
    #[error("missing sheet '{sheet}'")]
    MissingSheet { sheet: String },

    /// A present sheet lacks a column the operation reads.
    #[error("sheet '{sheet}' is missing column '{column}'")]
    MissingColumn { sheet: String, column: String },

    /// A cell could not be coerced to text.
    #[error("malformed field '{column}' in sheet '{sheet}' (row {row}): {reason}")]
    MalformedField {
        sheet: String,
        column: String,
        row: usize,
        reason: String,
    },

    #[error("failed to encode {format} report: {reason}")]
    Encode { format: &'static str, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl LineageError {
    pub fn missing_sheet(sheet: impl Into<String>) -> Self {
        LineageError::MissingSheet { sheet: sheet.into() }
    }

    pub fn missing_column(sheet: impl Into<String>, column: impl Into<String>) -> Self {
        LineageError::MissingColumn {
            sheet: sheet.into(),
            column: column.into(),
        }
    }
}
