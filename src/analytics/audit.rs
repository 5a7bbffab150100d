//! Comparison of precomputed dataset labels against the classifier.

use super::buckets::{Bucket, MarginBucket, Metric, SellTimeBucket};
use crate::dataset::ProductRecord;
use serde::Serialize;

/// A stored label that disagrees with the computed bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelMismatch {
    pub code: String,
    pub metric: Metric,
    pub stored: String,
    /// Source label of the computed bucket, or `None` when the value could
    /// not be classified at all
    pub computed: Option<&'static str>,
}

fn check<B: Bucket>(record: &ProductRecord, stored: Option<&str>) -> Option<LabelMismatch> {
    let stored = stored?;
    let computed = B::of_record(record).ok().map(|b| b.source_label());
    if computed == Some(stored.trim()) {
        return None;
    }
    Some(LabelMismatch {
        code: record.code.clone(),
        metric: B::METRIC,
        stored: stored.to_string(),
        computed,
    })
}

/// Every stored label that the classifier would not have produced.
///
/// Records without stored labels are skipped.
pub fn audit_labels(subset: &[&ProductRecord]) -> Vec<LabelMismatch> {
    subset
        .iter()
        .flat_map(|record| {
            [
                check::<SellTimeBucket>(record, record.stored_sell_time_label.as_deref()),
                check::<MarginBucket>(record, record.stored_margin_label.as_deref()),
            ]
        })
        .flatten()
        .collect()
}
