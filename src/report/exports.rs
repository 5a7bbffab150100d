//! The three operational spreadsheet exports.

use super::columns::{
    ColumnSpec, NumberFormat, SheetSpec, HEADER_CODE, HEADER_DAYS, HEADER_MARGIN, HEADER_NAME,
    HEADER_PROFIT, HEADER_STOCK, HEADER_UNITS,
};
use super::sheet::{self, Sheet};
use super::table::ExtractTable;
use super::xlsx;
use crate::analytics::extract;
use crate::dataset::ProductRecord;
use crate::error::Result;
use serde::Serialize;
use std::fmt;

pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Which ranked extract an export carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportKind {
    /// Items over 180 days with stock
    UrgentWithStock,
    /// Star items about to run out
    NearStockoutStars,
    /// Loss-making items with stock
    LossMakers,
}

impl ExportKind {
    pub const ALL: [ExportKind; 3] = [
        ExportKind::UrgentWithStock,
        ExportKind::NearStockoutStars,
        ExportKind::LossMakers,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            ExportKind::UrgentWithStock => "productos_mas_180_dias.xlsx",
            ExportKind::NearStockoutStars => "productos_estrella_sin_stock.xlsx",
            ExportKind::LossMakers => "productos_perdida.xlsx",
        }
    }

    pub fn sheet_name(&self) -> &'static str {
        match self {
            ExportKind::UrgentWithStock => ">180_dias",
            ExportKind::NearStockoutStars => "0_60_dias",
            ExportKind::LossMakers => "Perdida",
        }
    }

    pub fn download_label(&self) -> &'static str {
        match self {
            ExportKind::UrgentWithStock => "Descargar productos >180 días",
            ExportKind::NearStockoutStars => "Descargar productos Estrella Faltantes",
            ExportKind::LossMakers => "Descargar Productos con Perdida",
        }
    }

    pub fn sheet_spec(&self) -> SheetSpec {
        use NumberFormat::*;

        let code = ColumnSpec::new("code", HEADER_CODE, General);
        let name = ColumnSpec::new("name", HEADER_NAME, General);
        let stock = ColumnSpec::new("stock_on_hand", HEADER_STOCK, General);
        let units = ColumnSpec::new("total_units_sold", HEADER_UNITS, General);
        let profit = ColumnSpec::new("avg_net_profit_per_unit", HEADER_PROFIT, Currency);
        let margin = ColumnSpec::new("gross_margin", HEADER_MARGIN, Percentage);
        let days = ColumnSpec::new("avg_days_to_sell", HEADER_DAYS, Integer);

        let columns = match self {
            ExportKind::UrgentWithStock => vec![code, name, days, profit, stock, units],
            ExportKind::NearStockoutStars => vec![code, name, days, profit, margin, stock, units],
            ExportKind::LossMakers => vec![code, name, margin, profit, stock, units],
        };
        SheetSpec::new(self.sheet_name(), columns)
    }

    /// Run the matching extraction rule.
    pub fn extract(&self, subset: &[&ProductRecord]) -> Result<ExtractTable> {
        Ok(match self {
            ExportKind::UrgentWithStock => {
                ExtractTable::from_rows(&extract::urgent_with_stock(subset)?)
            }
            ExportKind::NearStockoutStars => {
                ExtractTable::from_rows(&extract::near_stockout_stars(subset)?)
            }
            ExportKind::LossMakers => {
                ExtractTable::from_rows(&extract::loss_makers_with_stock(subset)?)
            }
        })
    }
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// A finished export, fully materialized in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportFile {
    pub kind: ExportKind,
    pub file_name: &'static str,
    pub mime: &'static str,
    pub label: &'static str,
    pub rows: usize,
    pub bytes: Vec<u8>,
}

/// Extract, format and write one export.
pub fn build_export(kind: ExportKind, subset: &[&ProductRecord], margin: usize) -> Result<ExportFile> {
    let table = kind.extract(subset)?;
    let sheet: Sheet = sheet::format(&table, &kind.sheet_spec(), margin)?;
    let bytes = xlsx::write_workbook(&sheet)?;
    log::info!("Built {} with {} rows", kind.file_name(), sheet.row_count());

    Ok(ExportFile {
        kind,
        file_name: kind.file_name(),
        mime: XLSX_MIME,
        label: kind.download_label(),
        rows: sheet.row_count(),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::record::test_support::record;
    use crate::dataset::Division;
    use crate::report::sheet::DEFAULT_COLUMN_MARGIN;

    #[test]
    fn test_sheet_specs_resolve_against_their_extracts() {
        for kind in ExportKind::ALL {
            let table = kind.extract(&[]).unwrap();
            let sheet = sheet::format(&table, &kind.sheet_spec(), DEFAULT_COLUMN_MARGIN);
            assert!(sheet.is_ok(), "{kind}");
        }
    }

    #[test]
    fn test_loss_sheet_layout() {
        let spec = ExportKind::LossMakers.sheet_spec();
        assert_eq!(
            spec.headers(),
            vec![
                "CODIGO",
                "PRODUCTO",
                "MARGEN BRUTO [%]",
                "UTILIDAD NETA PROMEDIO [$]",
                "STOCK",
                "UNIDADES VENDIDAS"
            ]
        );
        let formats: Vec<_> = spec.columns.iter().map(|c| c.format).collect();
        assert_eq!(formats[2], NumberFormat::Percentage);
        assert_eq!(formats[3], NumberFormat::Currency);
    }

    #[test]
    fn test_download_labels() {
        let labels: Vec<_> = ExportKind::ALL.iter().map(|k| k.download_label()).collect();
        assert_eq!(
            labels,
            vec![
                "Descargar productos >180 días",
                "Descargar productos Estrella Faltantes",
                "Descargar Productos con Perdida",
            ]
        );
    }

    #[test]
    fn test_build_export_counts_rows() {
        let mut slow = record("S1", Division::Warehouse);
        slow.avg_days_to_sell = 250.0;
        let fast = record("F1", Division::Warehouse);
        let export = build_export(
            ExportKind::UrgentWithStock,
            &[&slow, &fast],
            DEFAULT_COLUMN_MARGIN,
        )
        .unwrap();
        assert_eq!(export.rows, 1);
        assert_eq!(export.mime, XLSX_MIME);
        assert_eq!(export.file_name, "productos_mas_180_dias.xlsx");
        assert_eq!(export.label, "Descargar productos >180 días");
        assert!(!export.bytes.is_empty());
    }
}
