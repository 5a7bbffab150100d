//! Reading the per-SKU summary table from CSV or JSON.
//!
//! Column names follow the upstream export (`COMERCIO`, `PROMEDIO_DIAS_VENTAS`,
//! ...). Rows are validated as they are decoded; the first bad row aborts
//! the load with its 1-based position.

use super::record::{Division, ProductRecord};
use crate::analytics::filter::{self, Subset};
use crate::error::{AnalyticsError, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// One undecoded row, with the source column names.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "COMERCIO")]
    pub division: String,
    #[serde(rename = "MARCA")]
    pub brand: String,
    #[serde(rename = "CATEGORIA")]
    pub category: String,
    #[serde(rename = "SUBCATEGORIA")]
    pub subcategory: String,
    #[serde(rename = "CODIGO")]
    pub code: String,
    #[serde(rename = "PRODUCTO")]
    pub name: String,
    #[serde(rename = "PROMEDIO_DIAS_VENTAS")]
    pub avg_days_to_sell: f64,
    #[serde(rename = "margen_bruto_%")]
    pub gross_margin_pct: f64,
    #[serde(rename = "beneficio_promedio_por_producto")]
    pub avg_net_profit_per_unit: f64,
    #[serde(rename = "STOCK")]
    pub stock_on_hand: f64,
    #[serde(rename = "unidades_vendidas_totales")]
    pub total_units_sold: f64,
    #[serde(rename = "TIEMPO_PROMEDIO_VENTAS", default)]
    pub sell_time_label: Option<String>,
    #[serde(rename = "metrica_margen_bruto", default)]
    pub margin_label: Option<String>,
}

impl RawRecord {
    /// Validate and convert; `row` is 1-based, header excluded.
    pub fn into_record(self, row: usize) -> Result<ProductRecord> {
        let division = Division::parse(&self.division).ok_or_else(|| {
            AnalyticsError::invalid_record(row, format!("unknown division '{}'", self.division))
        })?;

        Ok(ProductRecord {
            stock_on_hand: count_field(row, "STOCK", self.stock_on_hand)?,
            total_units_sold: count_field(
                row,
                "unidades_vendidas_totales",
                self.total_units_sold,
            )?,
            code: self.code.trim().to_string(),
            name: self.name,
            division,
            category: self.category,
            subcategory: self.subcategory,
            brand: self.brand,
            avg_days_to_sell: metric_field(row, "PROMEDIO_DIAS_VENTAS", self.avg_days_to_sell)?,
            gross_margin_pct: metric_field(row, "margen_bruto_%", self.gross_margin_pct)?,
            avg_net_profit_per_unit: metric_field(
                row,
                "beneficio_promedio_por_producto",
                self.avg_net_profit_per_unit,
            )?,
            stored_sell_time_label: non_blank(self.sell_time_label),
            stored_margin_label: non_blank(self.margin_label),
        })
    }
}

fn count_field(row: usize, column: &str, value: f64) -> Result<u64> {
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 {
        return Err(AnalyticsError::invalid_record(
            row,
            format!("{column} must be a non-negative whole number, got {value}"),
        ));
    }
    Ok(value as u64)
}

fn metric_field(row: usize, column: &str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(AnalyticsError::invalid_record(
            row,
            format!("{column} must be a finite number, got {value}"),
        ));
    }
    Ok(value)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Supported dataset encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Json,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(SourceFormat::Csv),
            "json" => Some(SourceFormat::Json),
            _ => None,
        }
    }
}

/// Immutable record set loaded from one source file.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub source: PathBuf,
    pub records: Vec<ProductRecord>,
}

impl Dataset {
    pub fn from_records(source: impl Into<PathBuf>, records: Vec<ProductRecord>) -> Self {
        Self {
            source: source.into(),
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records of one division.
    pub fn division(&self, division: Division) -> Subset<'_> {
        filter::by_division(&self.records, division)
    }
}

/// Load and validate the dataset at `path`.
///
/// A missing file, an unknown extension and a file without rows are all
/// reported as [`AnalyticsError::MissingInput`].
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    if !path.is_file() {
        return Err(AnalyticsError::missing_input(
            format!("dataset file not found: {}", path.display()),
            Some(path.to_path_buf()),
        ));
    }
    let format = SourceFormat::from_path(path).ok_or_else(|| {
        AnalyticsError::missing_input(
            format!(
                "unsupported dataset format for {} (expected .csv or .json)",
                path.display()
            ),
            Some(path.to_path_buf()),
        )
    })?;

    let raw = match format {
        SourceFormat::Csv => read_csv(path)?,
        SourceFormat::Json => read_json(path)?,
    };
    if raw.is_empty() {
        return Err(AnalyticsError::missing_input(
            format!("dataset {} has no rows", path.display()),
            Some(path.to_path_buf()),
        ));
    }

    let records = raw
        .into_iter()
        .enumerate()
        .map(|(i, r)| r.into_record(i + 1))
        .collect::<Result<Vec<_>>>()?;
    warn_duplicate_codes(&records);

    log::info!("Loaded {} records from {}", records.len(), path.display());
    Ok(Dataset::from_records(path, records))
}

fn read_csv(path: &Path) -> Result<Vec<RawRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;
    let mut rows = Vec::new();
    for row in reader.deserialize::<RawRecord>() {
        rows.push(row?);
    }
    Ok(rows)
}

fn read_json(path: &Path) -> Result<Vec<RawRecord>> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

fn warn_duplicate_codes(records: &[ProductRecord]) {
    let mut seen = HashSet::new();
    for record in records {
        if !seen.insert((record.division, record.code.as_str())) {
            log::warn!(
                "Duplicate product code {} in division {}",
                record.code,
                record.division
            );
        }
    }
}
