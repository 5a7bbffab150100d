//! Report formatting: extract tables, column specs, sheets and xlsx exports.

pub mod columns;
pub mod exports;
pub mod sheet;
pub mod table;
pub mod xlsx;

pub use columns::{ColumnSpec, NumberFormat, SheetSpec};
pub use exports::{build_export, ExportFile, ExportKind, XLSX_MIME};
pub use sheet::{format, Sheet, DEFAULT_COLUMN_MARGIN};
pub use table::{CellValue, ExtractRow, ExtractTable};
pub use xlsx::write_workbook;
