//! Projection of an extract onto a sheet spec.
//!
//! Formatting selects and renames columns and decides widths. It never
//! changes a cell value; number formats only travel alongside the data.

use super::columns::{NumberFormat, SheetSpec};
use super::table::{CellValue, ExtractTable};
use crate::error::{AnalyticsError, Result};
use serde::Serialize;

/// Extra characters added to an autofit column.
pub const DEFAULT_COLUMN_MARGIN: usize = 2;

/// A formatted sheet ready for a workbook writer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sheet {
    pub name: String,
    pub headers: Vec<String>,
    pub formats: Vec<NumberFormat>,
    /// Column width in characters; `None` keeps the writer default
    pub widths: Vec<Option<f64>>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Sheet {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Select, rename and size the columns of `table` as described by `spec`.
///
/// A spec column missing from the table fails the whole sheet.
pub fn format(table: &ExtractTable, spec: &SheetSpec, margin: usize) -> Result<Sheet> {
    let indices = spec
        .columns
        .iter()
        .map(|column| {
            table
                .column_index(column.field)
                .ok_or_else(|| AnalyticsError::format(spec.name, column.field))
        })
        .collect::<Result<Vec<_>>>()?;

    let rows: Vec<Vec<CellValue>> = table
        .rows
        .iter()
        .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
        .collect();

    let widths = spec
        .columns
        .iter()
        .enumerate()
        .map(|(col, column)| {
            column.autofit.then(|| {
                let longest = rows
                    .iter()
                    .map(|row| row[col].rendered_len())
                    .chain(std::iter::once(column.header.chars().count()))
                    .max()
                    .unwrap_or_default();
                (longest + margin) as f64
            })
        })
        .collect();

    log::debug!(
        "Formatted sheet '{}' with {} rows and {} columns",
        spec.name,
        rows.len(),
        spec.columns.len()
    );

    Ok(Sheet {
        name: spec.name.to_string(),
        headers: spec.columns.iter().map(|c| c.header.to_string()).collect(),
        formats: spec.columns.iter().map(|c| c.format).collect(),
        widths,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::columns::ColumnSpec;
    use pretty_assertions::assert_eq;

    fn table() -> ExtractTable {
        ExtractTable {
            columns: vec!["code", "name", "days"],
            rows: vec![
                vec![
                    CellValue::text("A1"),
                    CellValue::text("Filtro de aceite largo"),
                    CellValue::Number(200.0),
                ],
                vec![
                    CellValue::text("B2"),
                    CellValue::text("Pastilla"),
                    CellValue::Number(1234.5678),
                ],
            ],
        }
    }

    #[test]
    fn test_format_selects_renames_and_sizes() {
        let spec = SheetSpec::new(
            ">180_dias",
            vec![
                ColumnSpec::new("days", "DIAS PROMEDIO VENTAS", NumberFormat::Integer),
                ColumnSpec::new("code", "CODIGO", NumberFormat::General),
                ColumnSpec::new("name", "PRODUCTO", NumberFormat::General).fixed_width(),
            ],
        );
        let sheet = format(&table(), &spec, DEFAULT_COLUMN_MARGIN).unwrap();

        assert_eq!(sheet.headers, vec!["DIAS PROMEDIO VENTAS", "CODIGO", "PRODUCTO"]);
        assert_eq!(
            sheet.formats,
            vec![NumberFormat::Integer, NumberFormat::General, NumberFormat::General]
        );
        // header (20) is longer than "1234.5678"; "CODIGO" (6) beats "A1"
        assert_eq!(sheet.widths, vec![Some(22.0), Some(8.0), None]);
        assert_eq!(sheet.rows[1][0], CellValue::Number(1234.5678));
        assert_eq!(sheet.row_count(), 2);
    }

    #[test]
    fn test_width_uses_longest_value() {
        let spec = SheetSpec::new(
            "s",
            vec![ColumnSpec::new("name", "PRODUCTO", NumberFormat::General)],
        );
        let sheet = format(&table(), &spec, 3).unwrap();
        assert_eq!(sheet.widths, vec![Some(25.0)]);
    }

    #[test]
    fn test_missing_column_is_format_error() {
        let spec = SheetSpec::new(
            "Perdida",
            vec![ColumnSpec::new("brand", "MARCA", NumberFormat::General)],
        );
        let err = format(&table(), &spec, DEFAULT_COLUMN_MARGIN).unwrap_err();
        assert!(matches!(err, AnalyticsError::Format { ref column, .. } if column == "brand"));
    }

    #[test]
    fn test_empty_table_sizes_by_header() {
        let empty = ExtractTable {
            columns: vec!["code"],
            rows: Vec::new(),
        };
        let spec = SheetSpec::new(
            "s",
            vec![ColumnSpec::new("code", "CODIGO", NumberFormat::General)],
        );
        let sheet = format(&empty, &spec, DEFAULT_COLUMN_MARGIN).unwrap();
        assert_eq!(sheet.widths, vec![Some(8.0)]);
        assert!(sheet.rows.is_empty());
    }
}
