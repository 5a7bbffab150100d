//! Bucket classification of continuous metrics into ordered operational categories.
//!
//! Two fixed schemes exist, one per metric. Each scheme is an ordered enum
//! whose `ALL` constant is the canonical display order; charts and
//! distribution tables never reorder it.
//!
//! Interval conventions:
//! - Sell time uses closed upper bounds: `60.0` is still a star, `60.1` is not.
//! - Margin uses closed lower bounds: `0.0` is low profit, `10.0` mid profit.
//!
//! Non-finite values are never defaulted into a bucket; they surface as
//! classification errors so the data-quality defect stays visible.

use crate::dataset::ProductRecord;
use crate::error::{AnalyticsError, Result};
use serde::Serialize;
use std::fmt;

/// The metric a bucket scheme partitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// `avg_days_to_sell`
    SellTime,
    /// `avg_net_profit_per_unit`
    Margin,
}

impl Metric {
    /// Record field the metric reads.
    pub fn field_name(&self) -> &'static str {
        match self {
            Metric::SellTime => "avg_days_to_sell",
            Metric::Margin => "avg_net_profit_per_unit",
        }
    }

    pub fn value_of(&self, record: &ProductRecord) -> f64 {
        match self {
            Metric::SellTime => record.avg_days_to_sell,
            Metric::Margin => record.avg_net_profit_per_unit,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

/// An ordered, exhaustive, non-overlapping partition of one metric.
pub trait Bucket: Copy + Eq + Ord + fmt::Debug + Serialize + 'static {
    /// Metric this scheme classifies.
    const METRIC: Metric;
    /// Every bucket, in canonical display order.
    const ALL: &'static [Self];
    /// Chart title prefix; the division name is appended by callers.
    const CHART_TITLE: &'static str;
    /// Category-axis caption of the chart.
    const AXIS_LABEL: &'static str;

    /// Map a metric value to its bucket.
    fn classify(value: f64) -> Result<Self>;

    /// Human-readable range, e.g. `"0-60 días"`.
    fn display(&self) -> &'static str;

    /// Label used by the precomputed dataset column.
    fn source_label(&self) -> &'static str;

    fn from_source_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|bucket| bucket.source_label() == label)
    }

    /// Position in the canonical order.
    fn ordinal(&self) -> usize {
        Self::ALL
            .iter()
            .position(|bucket| bucket == self)
            .unwrap_or_default()
    }

    /// Classify a record, tagging errors with its product code.
    fn of_record(record: &ProductRecord) -> Result<Self> {
        Self::classify(Self::METRIC.value_of(record)).map_err(|e| e.for_record(&record.code))
    }
}

fn ensure_finite(metric: Metric, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AnalyticsError::classification(metric, value))
    }
}

/// Average days-to-sell buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SellTimeBucket {
    /// Up to 60 days
    Star,
    /// More than 60, up to 90 days
    Optimal,
    /// More than 90, up to 180 days
    ActionNeeded,
    /// More than 180 days
    ActionUrgent,
}

impl Bucket for SellTimeBucket {
    const METRIC: Metric = Metric::SellTime;
    const ALL: &'static [Self] = &[
        SellTimeBucket::Star,
        SellTimeBucket::Optimal,
        SellTimeBucket::ActionNeeded,
        SellTimeBucket::ActionUrgent,
    ];
    const CHART_TITLE: &'static str = "Tiempo Promedio de Ventas";
    const AXIS_LABEL: &'static str = "Rango de Días";

    fn classify(days: f64) -> Result<Self> {
        let days = ensure_finite(Self::METRIC, days)?;
        let bucket = if days <= 60.0 {
            SellTimeBucket::Star
        } else if days <= 90.0 {
            SellTimeBucket::Optimal
        } else if days <= 180.0 {
            SellTimeBucket::ActionNeeded
        } else {
            SellTimeBucket::ActionUrgent
        };
        Ok(bucket)
    }

    fn display(&self) -> &'static str {
        match self {
            SellTimeBucket::Star => "0-60 días",
            SellTimeBucket::Optimal => "61-90 días",
            SellTimeBucket::ActionNeeded => "91-180 días",
            SellTimeBucket::ActionUrgent => ">180 días",
        }
    }

    fn source_label(&self) -> &'static str {
        match self {
            SellTimeBucket::Star => "Estrella",
            SellTimeBucket::Optimal => "Optimo",
            SellTimeBucket::ActionNeeded => "Tomar Acción",
            SellTimeBucket::ActionUrgent => "Tomar Acción Urgente",
        }
    }
}

/// Net profit per unit buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarginBucket {
    /// Below zero
    Loss,
    /// From 0 up to (excluding) 10
    LowProfit,
    /// From 10 up to (excluding) 100
    MidProfit,
    /// 100 and above
    HighProfit,
}

impl Bucket for MarginBucket {
    const METRIC: Metric = Metric::Margin;
    const ALL: &'static [Self] = &[
        MarginBucket::Loss,
        MarginBucket::LowProfit,
        MarginBucket::MidProfit,
        MarginBucket::HighProfit,
    ];
    const CHART_TITLE: &'static str = "Utilidad Neta por Producto";
    const AXIS_LABEL: &'static str = "Rango de Utilidad Neta";

    fn classify(profit: f64) -> Result<Self> {
        let profit = ensure_finite(Self::METRIC, profit)?;
        let bucket = if profit < 0.0 {
            MarginBucket::Loss
        } else if profit < 10.0 {
            MarginBucket::LowProfit
        } else if profit < 100.0 {
            MarginBucket::MidProfit
        } else {
            MarginBucket::HighProfit
        };
        Ok(bucket)
    }

    fn display(&self) -> &'static str {
        match self {
            MarginBucket::Loss => "<0 $",
            MarginBucket::LowProfit => "0-10 $",
            MarginBucket::MidProfit => "10-100 $",
            MarginBucket::HighProfit => ">100 $",
        }
    }

    fn source_label(&self) -> &'static str {
        match self {
            MarginBucket::Loss => "Perdida",
            MarginBucket::LowProfit => "Beneficio Bajo",
            MarginBucket::MidProfit => "Beneficio Medio",
            MarginBucket::HighProfit => "Beneficio Alto",
        }
    }
}

/// A label from either scheme, as returned by [`classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum BucketLabel {
    SellTime(SellTimeBucket),
    Margin(MarginBucket),
}

impl BucketLabel {
    pub fn display(&self) -> &'static str {
        match self {
            BucketLabel::SellTime(b) => b.display(),
            BucketLabel::Margin(b) => b.display(),
        }
    }
}

/// Classify `value` under the scheme of `metric`.
pub fn classify(metric: Metric, value: f64) -> Result<BucketLabel> {
    match metric {
        Metric::SellTime => SellTimeBucket::classify(value).map(BucketLabel::SellTime),
        Metric::Margin => MarginBucket::classify(value).map(BucketLabel::Margin),
    }
}
