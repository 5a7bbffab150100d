//! Inventory analytics over a precomputed per-SKU summary table.
//!
//! The pipeline narrows the records by division and taxonomy, classifies
//! each item into sell-time and margin buckets, aggregates KPIs and bucket
//! distributions, extracts the outlier items that need follow-up and
//! formats them into xlsx workbooks.

pub mod analytics;
pub mod cli;
pub mod commands;
pub mod config;
pub mod dataset;
pub mod error;
pub mod formatting;
pub mod io;
pub mod output;
pub mod pipeline;
pub mod report;

pub use analytics::{
    Bucket, Distribution, FilterOptions, FilterSelection, Kpis, MarginBucket, SellTimeBucket,
};
pub use dataset::{load_dataset, Dataset, DatasetCache, Division, ProductRecord};
pub use error::{AnalyticsError, ErrorCode, Result};
pub use pipeline::{run, PipelineReport, PipelineRequest};
pub use report::{build_export, ExportFile, ExportKind};
