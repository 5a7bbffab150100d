//! Scalar performance indicators over a filtered subset.

use crate::dataset::ProductRecord;
use crate::error::{AnalyticsError, Result};
use crate::formatting::numbers::{format_count, format_currency, format_decimal, format_percent};
use serde::Serialize;
use std::collections::HashSet;

/// Aggregated indicators, kept at full precision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Kpis {
    /// Mean of `avg_days_to_sell`
    pub avg_days: f64,
    /// Mean of `gross_margin_pct`, in percentage units
    pub avg_margin_pct: f64,
    /// Mean of `avg_net_profit_per_unit`
    pub avg_profit: f64,
    /// Number of distinct product codes
    pub distinct_sku_count: usize,
}

/// Presentation strings for the four indicators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KpiDisplay {
    pub avg_days: String,
    pub avg_margin_pct: String,
    pub avg_profit: String,
    pub distinct_sku_count: String,
}

impl KpiDisplay {
    /// (caption, value) pairs in dashboard order.
    pub fn entries(&self) -> [(&'static str, &str); 4] {
        [
            ("Días Promedio", self.avg_days.as_str()),
            ("Margen Bruto %", self.avg_margin_pct.as_str()),
            ("Utilidad Neta Promedio", self.avg_profit.as_str()),
            ("Total SKUs", self.distinct_sku_count.as_str()),
        ]
    }
}

impl Kpis {
    /// Round only at presentation time.
    pub fn display(&self) -> KpiDisplay {
        KpiDisplay {
            avg_days: format_decimal(self.avg_days, 1),
            avg_margin_pct: format_percent(self.avg_margin_pct, 1),
            avg_profit: format_currency(self.avg_profit, 1),
            distinct_sku_count: format_count(self.distinct_sku_count),
        }
    }
}

fn mean(values: impl ExactSizeIterator<Item = f64>) -> f64 {
    let n = values.len();
    values.sum::<f64>() / n as f64
}

/// Compute the indicators over `subset`.
///
/// An empty subset has no meaningful mean and is rejected with
/// [`AnalyticsError::EmptyResult`].
pub fn aggregate(subset: &[&ProductRecord]) -> Result<Kpis> {
    if subset.is_empty() {
        return Err(AnalyticsError::empty_result(
            "KPI aggregation received no records",
        ));
    }

    let distinct: HashSet<&str> = subset.iter().map(|r| r.code.as_str()).collect();

    Ok(Kpis {
        avg_days: mean(subset.iter().map(|r| r.avg_days_to_sell)),
        avg_margin_pct: mean(subset.iter().map(|r| r.gross_margin_pct)),
        avg_profit: mean(subset.iter().map(|r| r.avg_net_profit_per_unit)),
        distinct_sku_count: distinct.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::record::test_support::record;
    use crate::dataset::Division;

    #[test]
    fn test_aggregate_means_and_distinct_codes() {
        let mut a = record("A", Division::Warehouse);
        a.avg_days_to_sell = 50.0;
        a.gross_margin_pct = 40.0;
        a.avg_net_profit_per_unit = 30.0;
        let mut b = record("B", Division::Warehouse);
        b.avg_days_to_sell = 115.0;
        b.gross_margin_pct = 47.2;
        b.avg_net_profit_per_unit = 56.6;
        let mut a_again = record("A", Division::Warehouse);
        a_again.avg_days_to_sell = 82.5;
        a_again.gross_margin_pct = 43.6;
        a_again.avg_net_profit_per_unit = 43.3;

        let subset = vec![&a, &b, &a_again];
        let kpis = aggregate(&subset).unwrap();

        assert!((kpis.avg_days - 82.5).abs() < 1e-9);
        assert!((kpis.avg_margin_pct - 43.6).abs() < 1e-9);
        assert!((kpis.avg_profit - 43.3).abs() < 1e-9);
        assert_eq!(kpis.distinct_sku_count, 2);
    }

    #[test]
    fn test_aggregate_rejects_empty_subset() {
        let err = aggregate(&[]).unwrap_err();
        assert!(err.is_empty_result());
    }

    #[test]
    fn test_display_formats() {
        let kpis = Kpis {
            avg_days: 82.46,
            avg_margin_pct: 43.62,
            avg_profit: 43.28,
            distinct_sku_count: 12_345,
        };
        let display = kpis.display();
        assert_eq!(display.avg_days, "82.5");
        assert_eq!(display.avg_margin_pct, "43.6%");
        assert_eq!(display.avg_profit, "$43.3");
        assert_eq!(display.distinct_sku_count, "12,345");
        assert_eq!(display.entries()[3], ("Total SKUs", "12,345"));
    }
}
