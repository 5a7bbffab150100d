//! Column specifications for spreadsheet exports.

use serde::Serialize;

pub const HEADER_CODE: &str = "CODIGO";
pub const HEADER_NAME: &str = "PRODUCTO";
pub const HEADER_DAYS: &str = "DIAS PROMEDIO VENTAS";
pub const HEADER_PROFIT: &str = "UTILIDAD NETA PROMEDIO [$]";
pub const HEADER_MARGIN: &str = "MARGEN BRUTO [%]";
pub const HEADER_STOCK: &str = "STOCK";
pub const HEADER_UNITS: &str = "UNIDADES VENDIDAS";

/// Excel number format applied to the data cells of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberFormat {
    General,
    Integer,
    Currency,
    Percentage,
}

impl NumberFormat {
    /// Format code, or `None` for the general format.
    pub fn code(&self) -> Option<&'static str> {
        match self {
            NumberFormat::General => None,
            NumberFormat::Integer => Some("0"),
            NumberFormat::Currency => Some("\"$\"#,##0.00_-"),
            NumberFormat::Percentage => Some("0%"),
        }
    }
}

/// One output column: where it comes from and how it looks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnSpec {
    pub field: &'static str,
    pub header: &'static str,
    pub format: NumberFormat,
    pub autofit: bool,
}

impl ColumnSpec {
    pub const fn new(field: &'static str, header: &'static str, format: NumberFormat) -> Self {
        Self {
            field,
            header,
            format,
            autofit: true,
        }
    }

    pub const fn fixed_width(mut self) -> Self {
        self.autofit = false;
        self
    }
}

/// Sheet name plus its ordered columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetSpec {
    pub name: &'static str,
    pub columns: Vec<ColumnSpec>,
}

impl SheetSpec {
    pub fn new(name: &'static str, columns: Vec<ColumnSpec>) -> Self {
        Self { name, columns }
    }

    pub fn headers(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.header).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_codes() {
        assert_eq!(NumberFormat::General.code(), None);
        assert_eq!(NumberFormat::Integer.code(), Some("0"));
        assert_eq!(NumberFormat::Currency.code(), Some("\"$\"#,##0.00_-"));
        assert_eq!(NumberFormat::Percentage.code(), Some("0%"));
    }

    #[test]
    fn test_column_defaults_to_autofit() {
        let column = ColumnSpec::new("code", HEADER_CODE, NumberFormat::General);
        assert!(column.autofit);
        assert!(!column.fixed_width().autofit);
    }
}
