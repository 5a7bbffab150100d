//! Ranked extraction of outlier items per named business rule.
//!
//! Every rule runs on the post-filter subset and returns freshly projected
//! rows. Sorting is stable, so equal keys keep source order and repeated
//! runs over the same subset give identical output.

use super::buckets::{MarginBucket, SellTimeBucket};
use crate::dataset::ProductRecord;
use crate::error::Result;
use crate::formatting::numbers::{format_currency, round_half_even};
use crate::report::table::{CellValue, ExtractRow};
use serde::Serialize;

/// Default size of the slow-mover table.
pub const DEFAULT_SLOW_MOVER_LIMIT: usize = 5;

/// Convert a margin from percentage units (0–100) to a fraction (0–1).
#[inline]
pub fn percent_to_fraction(pct: f64) -> f64 {
    pct / 100.0
}

/// Slow sellers (more than 180 days) that still hold stock.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UrgentRow {
    pub code: String,
    pub name: String,
    pub avg_days_to_sell: f64,
    pub avg_net_profit_per_unit: f64,
    pub stock_on_hand: u64,
    pub total_units_sold: u64,
}

/// Fast sellers (up to 60 days) about to run out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StarRow {
    pub code: String,
    pub name: String,
    pub avg_days_to_sell: f64,
    pub avg_net_profit_per_unit: f64,
    /// Gross margin as a fraction (0.436 for 43.6 %)
    pub gross_margin: f64,
    pub stock_on_hand: u64,
    pub total_units_sold: u64,
}

/// Items sold at a loss that still hold stock.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LossRow {
    pub code: String,
    pub name: String,
    /// Gross margin as a fraction
    pub gross_margin: f64,
    pub avg_net_profit_per_unit: f64,
    pub stock_on_hand: u64,
    pub total_units_sold: u64,
}

/// Display-only slow mover.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlowMoverRow {
    pub name: String,
    pub brand: String,
    pub avg_days_to_sell: f64,
    pub avg_net_profit_per_unit: f64,
    pub stock_on_hand: u64,
}

/// Slow mover rendered for the presentation table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlowMoverDisplay {
    pub name: String,
    pub brand: String,
    pub days: i64,
    pub profit: String,
    pub stock: u64,
}

impl SlowMoverRow {
    pub const HEADERS: [&'static str; 5] = [
        "PRODUCTO",
        "MARCA",
        "DIAS PROMEDIO",
        "UTILIDAD NETA PROMEDIO",
        "STOCK",
    ];

    pub fn display(&self) -> SlowMoverDisplay {
        SlowMoverDisplay {
            name: self.name.clone(),
            brand: self.brand.clone(),
            days: round_half_even(self.avg_days_to_sell, 0) as i64,
            profit: format_currency(self.avg_net_profit_per_unit, 2),
            stock: self.stock_on_hand,
        }
    }
}

/// `ACTION_URGENT` items with stock, slowest first.
pub fn urgent_with_stock(subset: &[&ProductRecord]) -> Result<Vec<UrgentRow>> {
    let mut rows = Vec::new();
    for record in subset {
        if record.sell_time_bucket()? == SellTimeBucket::ActionUrgent && record.has_stock() {
            rows.push(UrgentRow {
                code: record.code.clone(),
                name: record.name.clone(),
                avg_days_to_sell: record.avg_days_to_sell,
                avg_net_profit_per_unit: record.avg_net_profit_per_unit,
                stock_on_hand: record.stock_on_hand,
                total_units_sold: record.total_units_sold,
            });
        }
    }
    rows.sort_by(|a, b| b.avg_days_to_sell.total_cmp(&a.avg_days_to_sell));
    Ok(rows)
}

/// `STAR` items with fewer than two units left, in source order.
pub fn near_stockout_stars(subset: &[&ProductRecord]) -> Result<Vec<StarRow>> {
    let mut rows = Vec::new();
    for record in subset {
        if record.sell_time_bucket()? == SellTimeBucket::Star && record.stock_on_hand < 2 {
            rows.push(StarRow {
                code: record.code.clone(),
                name: record.name.clone(),
                avg_days_to_sell: record.avg_days_to_sell,
                avg_net_profit_per_unit: record.avg_net_profit_per_unit,
                gross_margin: percent_to_fraction(record.gross_margin_pct),
                stock_on_hand: record.stock_on_hand,
                total_units_sold: record.total_units_sold,
            });
        }
    }
    Ok(rows)
}

/// `LOSS` items with stock, worst loss first.
pub fn loss_makers_with_stock(subset: &[&ProductRecord]) -> Result<Vec<LossRow>> {
    let mut rows = Vec::new();
    for record in subset {
        if record.margin_bucket()? == MarginBucket::Loss && record.has_stock() {
            rows.push(LossRow {
                code: record.code.clone(),
                name: record.name.clone(),
                gross_margin: percent_to_fraction(record.gross_margin_pct),
                avg_net_profit_per_unit: record.avg_net_profit_per_unit,
                stock_on_hand: record.stock_on_hand,
                total_units_sold: record.total_units_sold,
            });
        }
    }
    rows.sort_by(|a, b| a.avg_net_profit_per_unit.total_cmp(&b.avg_net_profit_per_unit));
    Ok(rows)
}

/// The `limit` items with stock and the highest days-to-sell.
///
/// Items whose days-to-sell is not finite have no rank and are left out;
/// the sell-time distribution reports them as classification errors.
pub fn top_slow_movers(subset: &[&ProductRecord], limit: usize) -> Vec<SlowMoverRow> {
    let mut with_stock: Vec<&ProductRecord> = subset
        .iter()
        .copied()
        .filter(|r| r.has_stock() && r.avg_days_to_sell.is_finite())
        .collect();
    with_stock.sort_by(|a, b| b.avg_days_to_sell.total_cmp(&a.avg_days_to_sell));
    with_stock
        .into_iter()
        .take(limit)
        .map(|r| SlowMoverRow {
            name: r.name.clone(),
            brand: r.brand.clone(),
            avg_days_to_sell: r.avg_days_to_sell,
            avg_net_profit_per_unit: r.avg_net_profit_per_unit,
            stock_on_hand: r.stock_on_hand,
        })
        .collect()
}

impl ExtractRow for UrgentRow {
    const FIELDS: &'static [&'static str] = &[
        "code",
        "name",
        "avg_days_to_sell",
        "avg_net_profit_per_unit",
        "stock_on_hand",
        "total_units_sold",
    ];

    fn cells(&self) -> Vec<CellValue> {
        vec![
            CellValue::text(&self.code),
            CellValue::text(&self.name),
            CellValue::Number(self.avg_days_to_sell),
            CellValue::Number(self.avg_net_profit_per_unit),
            CellValue::Integer(self.stock_on_hand),
            CellValue::Integer(self.total_units_sold),
        ]
    }
}

impl ExtractRow for StarRow {
    const FIELDS: &'static [&'static str] = &[
        "code",
        "name",
        "avg_days_to_sell",
        "avg_net_profit_per_unit",
        "gross_margin",
        "stock_on_hand",
        "total_units_sold",
    ];

    fn cells(&self) -> Vec<CellValue> {
        vec![
            CellValue::text(&self.code),
            CellValue::text(&self.name),
            CellValue::Number(self.avg_days_to_sell),
            CellValue::Number(self.avg_net_profit_per_unit),
            CellValue::Number(self.gross_margin),
            CellValue::Integer(self.stock_on_hand),
            CellValue::Integer(self.total_units_sold),
        ]
    }
}

impl ExtractRow for LossRow {
    const FIELDS: &'static [&'static str] = &[
        "code",
        "name",
        "gross_margin",
        "avg_net_profit_per_unit",
        "stock_on_hand",
        "total_units_sold",
    ];

    fn cells(&self) -> Vec<CellValue> {
        vec![
            CellValue::text(&self.code),
            CellValue::text(&self.name),
            CellValue::Number(self.gross_margin),
            CellValue::Number(self.avg_net_profit_per_unit),
            CellValue::Integer(self.stock_on_hand),
            CellValue::Integer(self.total_units_sold),
        ]
    }
}
