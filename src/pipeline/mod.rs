//! One deterministic analytics run over a loaded dataset.
//!
//! Filtering happens once. KPIs, both distributions, the slow-mover table,
//! each export and the label audit are then computed independently; every
//! branch carries its own `Result` so one failure never hides the others.

use crate::analytics::{
    audit_labels, distribution, filter, kpi, top_slow_movers, Distribution, FilterSelection,
    Kpis, LabelMismatch, MarginBucket, SellTimeBucket, SlowMoverRow, DEFAULT_SLOW_MOVER_LIMIT,
};
use crate::dataset::{Dataset, Division};
use crate::error::{AnalyticsError, Result};
use crate::report::{build_export, ExportFile, ExportKind, DEFAULT_COLUMN_MARGIN};
use std::time::Instant;

/// What to compute for one selection.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineRequest {
    pub division: Division,
    pub selection: FilterSelection,
    pub top_slow_movers: usize,
    pub column_margin: usize,
    pub exports: Vec<ExportKind>,
}

impl PipelineRequest {
    pub fn new(division: Division) -> Self {
        Self {
            division,
            selection: FilterSelection::default(),
            top_slow_movers: DEFAULT_SLOW_MOVER_LIMIT,
            column_margin: DEFAULT_COLUMN_MARGIN,
            exports: ExportKind::ALL.to_vec(),
        }
    }

    pub fn with_selection(mut self, selection: FilterSelection) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_top_slow_movers(mut self, limit: usize) -> Self {
        self.top_slow_movers = limit;
        self
    }

    pub fn with_column_margin(mut self, margin: usize) -> Self {
        self.column_margin = margin;
        self
    }

    pub fn without_exports(mut self) -> Self {
        self.exports.clear();
        self
    }
}

/// Outputs of a run; each branch succeeds or fails on its own.
#[derive(Debug)]
pub struct PipelineReport {
    pub division: Division,
    pub selection: FilterSelection,
    pub record_count: usize,
    pub kpis: Result<Kpis>,
    pub sell_time: Result<Distribution<SellTimeBucket>>,
    pub margin: Result<Distribution<MarginBucket>>,
    pub slow_movers: Vec<SlowMoverRow>,
    pub slow_mover_limit: usize,
    pub exports: Vec<(ExportKind, Result<ExportFile>)>,
    pub label_mismatches: Vec<LabelMismatch>,
}

impl PipelineReport {
    /// Errors from every failed branch.
    pub fn failures(&self) -> Vec<&AnalyticsError> {
        let mut errors: Vec<&AnalyticsError> = [
            self.kpis.as_ref().err(),
            self.sell_time.as_ref().err(),
            self.margin.as_ref().err(),
        ]
        .into_iter()
        .flatten()
        .collect();
        errors.extend(self.exports.iter().filter_map(|(_, r)| r.as_ref().err()));
        errors
    }

    pub fn is_complete(&self) -> bool {
        self.failures().is_empty()
    }
}

/// Run every stage for `request` over `dataset`.
///
/// Fails with [`AnalyticsError::MissingInput`] for an empty dataset and with
/// [`AnalyticsError::EmptyResult`] when the selection matches nothing.
pub fn run(dataset: &Dataset, request: &PipelineRequest) -> Result<PipelineReport> {
    if dataset.is_empty() {
        return Err(AnalyticsError::missing_input(
            "dataset has no records",
            Some(dataset.source.clone()),
        ));
    }

    let started = Instant::now();
    let subset = filter::apply(&dataset.records, request.division, &request.selection);
    if subset.is_empty() {
        return Err(AnalyticsError::empty_result(
            request.selection.describe(request.division),
        ));
    }

    let kpis = kpi::aggregate(&subset);
    let sell_time = distribution::build::<SellTimeBucket>(&subset);
    let margin = distribution::build::<MarginBucket>(&subset);
    let slow_movers = top_slow_movers(&subset, request.top_slow_movers);
    let exports = request
        .exports
        .iter()
        .map(|&kind| (kind, build_export(kind, &subset, request.column_margin)))
        .collect();

    let label_mismatches = audit_labels(&subset);
    for mismatch in &label_mismatches {
        log::warn!(
            "Stored {} label '{}' for {} disagrees with computed {}",
            mismatch.metric,
            mismatch.stored,
            mismatch.code,
            mismatch.computed.unwrap_or("<unclassifiable>")
        );
    }

    let report = PipelineReport {
        division: request.division,
        selection: request.selection.clone(),
        record_count: subset.len(),
        kpis,
        sell_time,
        margin,
        slow_movers,
        slow_mover_limit: request.top_slow_movers,
        exports,
        label_mismatches,
    };
    for error in report.failures() {
        log::warn!("[{}] {}", error.code(), error);
    }
    log::info!(
        "Pipeline for {} finished in {:?}",
        request.selection.describe(request.division),
        started.elapsed()
    );
    Ok(report)
}
