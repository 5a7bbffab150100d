//! Error type shared by every stage of the analytics pipeline.
//!
//! Each variant maps to a structured [`ErrorCode`] so callers (and the CLI)
//! can tell the recoverable cases apart:
//! - E001-E009: dataset availability and I/O
//! - E010-E019: dataset content
//! - E020-E029: configuration
//! - E030-E039: analytics (empty selections, classification)
//! - E040-E049: export formatting and workbook generation
//!
//! Failures are local to the stage that detects them. The pipeline keeps
//! computing independent branches when one of them returns an error.

use crate::analytics::buckets::Metric;
use std::path::PathBuf;
use thiserror::Error;

/// Structured error code for documentation and programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode(&'static str);

impl ErrorCode {
    /// Dataset file missing, unreadable or empty
    pub const MISSING_INPUT: ErrorCode = ErrorCode("E001");
    /// Generic I/O failure
    pub const IO_GENERIC: ErrorCode = ErrorCode("E009");

    /// A row violates the dataset contract
    pub const INVALID_RECORD: ErrorCode = ErrorCode("E010");
    /// CSV decoding failed
    pub const CSV_DECODE: ErrorCode = ErrorCode("E011");
    /// JSON decoding failed
    pub const JSON_DECODE: ErrorCode = ErrorCode("E012");

    /// Config error - generic
    pub const CONFIG_GENERIC: ErrorCode = ErrorCode("E029");

    /// Filters matched no records
    pub const EMPTY_RESULT: ErrorCode = ErrorCode("E030");
    /// Metric value cannot be placed in any bucket
    pub const CLASSIFICATION: ErrorCode = ErrorCode("E031");

    /// Export column spec references a missing column
    pub const FORMAT_COLUMN: ErrorCode = ErrorCode("E040");
    /// Workbook generation failed
    pub const XLSX_WRITE: ErrorCode = ErrorCode("E041");

    /// Get the error code string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Main error type for stocklens operations
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// Dataset absent, unreadable or without rows
    #[error("Dataset unavailable: {message}")]
    MissingInput {
        message: String,
        path: Option<PathBuf>,
    },

    /// The division and filter selection matched nothing
    #[error("No records match the selection: {selection}")]
    EmptyResult { selection: String },

    /// A metric value is non-finite or otherwise unclassifiable
    #[error("Cannot classify {metric} = {value}{}", product_suffix(.code))]
    Classification {
        metric: Metric,
        value: f64,
        code: Option<String>,
    },

    /// An export column spec names a field the extract does not carry
    #[error("Export sheet '{sheet}' references column '{column}' which is not in the extract")]
    Format { sheet: String, column: String },

    /// A dataset row breaks the input contract
    #[error("Invalid record at row {row}: {message}")]
    InvalidRecord { row: usize, message: String },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// CSV errors
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Workbook writer errors
    #[error(transparent)]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

impl AnalyticsError {
    /// Create a missing-input error, optionally tied to a dataset path
    pub fn missing_input(message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::MissingInput {
            message: message.into(),
            path,
        }
    }

    /// Create an empty-result error describing the selection that matched nothing
    pub fn empty_result(selection: impl Into<String>) -> Self {
        Self::EmptyResult {
            selection: selection.into(),
        }
    }

    /// Create a classification error for a bare metric value
    pub fn classification(metric: Metric, value: f64) -> Self {
        Self::Classification {
            metric,
            value,
            code: None,
        }
    }

    /// Create a format error for a missing export column
    pub fn format(sheet: impl Into<String>, column: impl Into<String>) -> Self {
        Self::Format {
            sheet: sheet.into(),
            column: column.into(),
        }
    }

    /// Create an invalid-record error (rows are 1-based, header excluded)
    pub fn invalid_record(row: usize, message: impl Into<String>) -> Self {
        Self::InvalidRecord {
            row,
            message: message.into(),
        }
    }

    /// Attach the product code to a classification error.
    ///
    /// Other variants are returned unchanged.
    pub fn for_record(self, product_code: &str) -> Self {
        match self {
            Self::Classification {
                metric,
                value,
                code: None,
            } => Self::Classification {
                metric,
                value,
                code: Some(product_code.to_string()),
            },
            other => other,
        }
    }

    /// Get the error code.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::MissingInput { .. } => ErrorCode::MISSING_INPUT,
            Self::EmptyResult { .. } => ErrorCode::EMPTY_RESULT,
            Self::Classification { .. } => ErrorCode::CLASSIFICATION,
            Self::Format { .. } => ErrorCode::FORMAT_COLUMN,
            Self::InvalidRecord { .. } => ErrorCode::INVALID_RECORD,
            Self::Config(_) => ErrorCode::CONFIG_GENERIC,
            Self::Io(_) => ErrorCode::IO_GENERIC,
            Self::Csv(_) => ErrorCode::CSV_DECODE,
            Self::Json(_) => ErrorCode::JSON_DECODE,
            Self::Xlsx(_) => ErrorCode::XLSX_WRITE,
        }
    }

    /// Get the error category name.
    #[must_use]
    pub fn category(&self) -> &'static str {
        match self {
            Self::MissingInput { .. } | Self::Io(_) => "Input",
            Self::InvalidRecord { .. } | Self::Csv(_) | Self::Json(_) => "Data",
            Self::Config(_) => "Config",
            Self::EmptyResult { .. } | Self::Classification { .. } => "Analytics",
            Self::Format { .. } | Self::Xlsx(_) => "Export",
        }
    }

    /// Whether the user can resolve the error by changing input or selection.
    #[must_use]
    pub fn is_user_fixable(&self) -> bool {
        matches!(
            self,
            Self::MissingInput { .. }
                | Self::EmptyResult { .. }
                | Self::InvalidRecord { .. }
                | Self::Config(_)
                | Self::Csv(_)
                | Self::Json(_)
        )
    }

    /// Whether this is the non-fatal "nothing matched" case.
    #[must_use]
    pub fn is_empty_result(&self) -> bool {
        matches!(self, Self::EmptyResult { .. })
    }
}

fn product_suffix(code: &Option<String>) -> String {
    code.as_deref()
        .map(|c| format!(" (product {c})"))
        .unwrap_or_default()
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, AnalyticsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_is_user_fixable() {
        let err = AnalyticsError::missing_input("no file", Some(PathBuf::from("data.csv")));
        assert_eq!(err.code(), ErrorCode::MISSING_INPUT);
        assert_eq!(err.category(), "Input");
        assert!(err.is_user_fixable());
    }

    #[test]
    fn test_classification_error_carries_record_code() {
        let err = AnalyticsError::classification(Metric::SellTime, f64::NAN).for_record("A-100");
        assert_eq!(err.code(), ErrorCode::CLASSIFICATION);
        assert!(!err.is_user_fixable());
        let message = err.to_string();
        assert!(message.contains("avg_days_to_sell"), "{message}");
        assert!(message.contains("A-100"), "{message}");
    }

    #[test]
    fn test_for_record_keeps_existing_code() {
        let err = AnalyticsError::Classification {
            metric: Metric::Margin,
            value: f64::INFINITY,
            code: Some("first".into()),
        }
        .for_record("second");
        assert!(err.to_string().contains("first"));
    }

    #[test]
    fn test_for_record_ignores_other_variants() {
        let err = AnalyticsError::empty_result("ALMACEN").for_record("X");
        assert!(err.is_empty_result());
    }

    #[test]
    fn test_format_error_message() {
        let err = AnalyticsError::format("Perdida", "brand");
        assert_eq!(err.code().as_str(), "E040");
        assert_eq!(
            err.to_string(),
            "Export sheet 'Perdida' references column 'brand' which is not in the extract"
        );
    }
}
