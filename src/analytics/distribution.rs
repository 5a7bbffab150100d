//! Ordered bucket distributions, the input of the bar charts.
//!
//! A distribution always has one row per bucket of its scheme, in the
//! scheme's canonical order, zero-count buckets included.

use super::buckets::Bucket;
use crate::dataset::{Division, ProductRecord};
use crate::error::Result;
use crate::formatting::numbers::round_half_even;
use serde::Serialize;

/// One bar of a distribution chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionRow<B> {
    pub bucket: B,
    pub display: &'static str,
    pub count: usize,
    /// Share of the subset in percent, one decimal
    pub percentage: f64,
}

/// Count/percentage table for one bucket scheme.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Distribution<B> {
    pub total: usize,
    pub rows: Vec<DistributionRow<B>>,
}

impl<B: Bucket> Distribution<B> {
    /// Chart title for a division, e.g. `"Tiempo Promedio de Ventas - ALMACEN"`.
    pub fn title(&self, division: Division) -> String {
        format!("{} - {}", B::CHART_TITLE, division)
    }

    pub fn axis_label(&self) -> &'static str {
        B::AXIS_LABEL
    }

    pub fn count_of(&self, bucket: B) -> usize {
        self.rows
            .iter()
            .find(|row| row.bucket == bucket)
            .map_or(0, |row| row.count)
    }
}

/// Classify every record of `subset` under scheme `B` and tabulate.
///
/// Fails on the first record whose metric cannot be classified.
pub fn build<B: Bucket>(subset: &[&ProductRecord]) -> Result<Distribution<B>> {
    let mut counts = vec![0usize; B::ALL.len()];
    for record in subset {
        let bucket = B::of_record(record)?;
        counts[bucket.ordinal()] += 1;
    }

    let total = subset.len();
    let rows = B::ALL
        .iter()
        .zip(counts)
        .map(|(bucket, count)| DistributionRow {
            bucket: *bucket,
            display: bucket.display(),
            count,
            percentage: percentage(count, total),
        })
        .collect();

    Ok(Distribution { total, rows })
}

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round_half_even(count as f64 / total as f64 * 100.0, 1)
}
