//! Product record: one row of the precomputed per-SKU summary table.

use crate::analytics::buckets::{Bucket, MarginBucket, SellTimeBucket};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Top-level organizational split of the business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Division {
    /// Parts counter (`ALMACEN` in the source data)
    #[serde(rename = "ALMACEN")]
    Warehouse,
    /// Service workshop (`TALLER` in the source data)
    #[serde(rename = "TALLER")]
    Workshop,
}

impl Division {
    pub const ALL: [Division; 2] = [Division::Warehouse, Division::Workshop];

    /// Value used in the `COMERCIO` column.
    pub fn source_name(&self) -> &'static str {
        match self {
            Division::Warehouse => "ALMACEN",
            Division::Workshop => "TALLER",
        }
    }

    /// Parse either the source spelling or the English name, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "ALMACEN" | "ALMACÉN" | "WAREHOUSE" => Some(Division::Warehouse),
            "TALLER" | "WORKSHOP" => Some(Division::Workshop),
            _ => None,
        }
    }
}

impl fmt::Display for Division {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.source_name())
    }
}

impl FromStr for Division {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Division::parse(s).ok_or_else(|| {
            format!("unknown division '{s}' (expected ALMACEN/warehouse or TALLER/workshop)")
        })
    }
}

/// One product of the summary table. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRecord {
    pub code: String,
    pub name: String,
    pub division: Division,
    pub category: String,
    pub subcategory: String,
    pub brand: String,
    /// Average days a unit stays on the shelf before selling (DSI)
    pub avg_days_to_sell: f64,
    /// Gross margin in percentage units (43.6 means 43.6 %)
    pub gross_margin_pct: f64,
    pub avg_net_profit_per_unit: f64,
    pub stock_on_hand: u64,
    pub total_units_sold: u64,
    /// Sell-time label as stored in the dataset, if the column was present
    pub stored_sell_time_label: Option<String>,
    /// Margin label as stored in the dataset, if the column was present
    pub stored_margin_label: Option<String>,
}

impl ProductRecord {
    /// Sell-time bucket computed from `avg_days_to_sell`.
    pub fn sell_time_bucket(&self) -> Result<SellTimeBucket> {
        SellTimeBucket::classify(self.avg_days_to_sell).map_err(|e| e.for_record(&self.code))
    }

    /// Margin bucket computed from `avg_net_profit_per_unit`.
    pub fn margin_bucket(&self) -> Result<MarginBucket> {
        MarginBucket::classify(self.avg_net_profit_per_unit).map_err(|e| e.for_record(&self.code))
    }

    pub fn has_stock(&self) -> bool {
        self.stock_on_hand > 0
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Build a record with neutral defaults; tests override what they need.
    pub fn record(code: &str, division: Division) -> ProductRecord {
        ProductRecord {
            code: code.to_string(),
            name: format!("Product {code}"),
            division,
            category: "FILTROS".to_string(),
            subcategory: "ACEITE".to_string(),
            brand: "BOSCH".to_string(),
            avg_days_to_sell: 30.0,
            gross_margin_pct: 40.0,
            avg_net_profit_per_unit: 25.0,
            stock_on_hand: 3,
            total_units_sold: 12,
            stored_sell_time_label: None,
            stored_margin_label: None,
        }
    }
}
