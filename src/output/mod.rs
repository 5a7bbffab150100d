//! Presentation of pipeline results: terminal tables and JSON.

pub mod json;
pub mod terminal;

use crate::error::{AnalyticsError, ErrorCode};
use crate::report::{ExportFile, ExportKind};
use anyhow::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Notice shown when the selection matches no records.
pub const EMPTY_SELECTION_NOTICE: &str = "No hay datos para los filtros seleccionados.";

/// Serializable view of an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorSummary {
    pub code: &'static str,
    pub category: &'static str,
    pub message: String,
    pub user_fixable: bool,
}

impl From<&AnalyticsError> for ErrorSummary {
    fn from(error: &AnalyticsError) -> Self {
        Self {
            code: error.code().as_str(),
            category: error.category(),
            message: error.to_string(),
            user_fixable: error.is_user_fixable(),
        }
    }
}

impl ErrorSummary {
    /// A built workbook that could not be saved.
    pub fn write_failure(error: &anyhow::Error) -> Self {
        Self {
            code: ErrorCode::IO_GENERIC.as_str(),
            category: "Export",
            message: format!("{error:#}"),
            user_fixable: true,
        }
    }
}

/// What happened to one export after the pipeline built it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportSummary {
    pub file_name: &'static str,
    pub label: &'static str,
    pub sheet: &'static str,
    pub rows: Option<usize>,
    /// Where the workbook was written, if it was
    pub path: Option<PathBuf>,
    pub error: Option<ErrorSummary>,
}

impl ExportSummary {
    pub fn built(file: &ExportFile, path: Option<PathBuf>) -> Self {
        Self {
            file_name: file.file_name,
            label: file.label,
            sheet: file.kind.sheet_name(),
            rows: Some(file.rows),
            path,
            error: None,
        }
    }

    /// The workbook was built but writing it to disk failed.
    pub fn unwritten(file: &ExportFile, error: &anyhow::Error) -> Self {
        Self {
            file_name: file.file_name,
            label: file.label,
            sheet: file.kind.sheet_name(),
            rows: Some(file.rows),
            path: None,
            error: Some(ErrorSummary::write_failure(error)),
        }
    }

    pub fn failed(kind: ExportKind, error: &AnalyticsError) -> Self {
        Self {
            file_name: kind.file_name(),
            label: kind.download_label(),
            sheet: kind.sheet_name(),
            rows: None,
            path: None,
            error: Some(error.into()),
        }
    }
}

/// Print `content` or write it to `output_file`.
pub fn emit(content: &str, output_file: Option<&Path>) -> Result<()> {
    match output_file {
        Some(path) => {
            crate::io::write_file(path, content)?;
            log::info!("Report written to {}", path.display());
        }
        None => println!("{content}"),
    }
    Ok(())
}
