//! Pure analytics stages: classification, filtering, aggregation,
//! distributions and ranked extraction.
//!
//! Every stage takes a borrowed subset and returns a new derived value.

pub mod audit;
pub mod buckets;
pub mod distribution;
pub mod extract;
pub mod filter;
pub mod kpi;

pub use audit::{audit_labels, LabelMismatch};
pub use buckets::{classify, Bucket, BucketLabel, MarginBucket, Metric, SellTimeBucket};
pub use distribution::{Distribution, DistributionRow};
pub use extract::{
    loss_makers_with_stock, near_stockout_stars, percent_to_fraction, top_slow_movers,
    urgent_with_stock, LossRow, SlowMoverDisplay, SlowMoverRow, StarRow, UrgentRow,
    DEFAULT_SLOW_MOVER_LIMIT,
};
pub use filter::{Dimension, DimensionFilter, FilterOptions, FilterSelection, Subset, ALL_SENTINEL};
pub use kpi::{aggregate, KpiDisplay, Kpis};
