//! Column-oriented tables produced by the ranked extractor.

use serde::Serialize;

/// A single cell of an extract.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Integer(u64),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    /// Plain rendering used to size columns.
    ///
    /// Floats with no fractional part keep a trailing `.0`, so `200.0`
    /// counts as five characters.
    pub fn raw_text(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Integer(n) => n.to_string(),
            CellValue::Number(x) if !x.is_finite() => String::new(),
            CellValue::Number(x) if x.fract() == 0.0 && x.abs() < 1e16 => format!("{x:.1}"),
            CellValue::Number(x) => x.to_string(),
        }
    }

    /// Character count of [`raw_text`](Self::raw_text).
    pub fn rendered_len(&self) -> usize {
        self.raw_text().chars().count()
    }
}

/// A row type the extractor emits, with its field names in column order.
pub trait ExtractRow {
    const FIELDS: &'static [&'static str];

    /// Cell values aligned with [`FIELDS`](Self::FIELDS).
    fn cells(&self) -> Vec<CellValue>;
}

/// Rows of one extract addressed by field name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractTable {
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<CellValue>>,
}

impl ExtractTable {
    pub fn from_rows<R: ExtractRow>(rows: &[R]) -> Self {
        Self {
            columns: R::FIELDS.to_vec(),
            rows: rows.iter().map(ExtractRow::cells).collect(),
        }
    }

    pub fn column_index(&self, field: &str) -> Option<usize> {
        self.columns.iter().position(|c| *c == field)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
