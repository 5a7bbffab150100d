//! JSON rendering of a pipeline report.

use super::{ErrorSummary, ExportSummary, EMPTY_SELECTION_NOTICE};
use crate::analytics::{
    Distribution, FilterOptions, FilterSelection, KpiDisplay, Kpis, LabelMismatch, MarginBucket,
    SellTimeBucket, SlowMoverDisplay,
};
use crate::dataset::Division;
use crate::error::{AnalyticsError, Result as AnalyticsResult};
use crate::pipeline::PipelineReport;
use anyhow::Result;
use serde::Serialize;

/// A branch value or the error that replaced it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome<T> {
    Ok(T),
    Error(ErrorSummary),
}

impl<T> Outcome<T> {
    fn from_result<S>(result: &AnalyticsResult<S>, f: impl FnOnce(&S) -> T) -> Self {
        match result {
            Ok(value) => Outcome::Ok(f(value)),
            Err(e) => Outcome::Error(e.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct KpiSection {
    pub values: Kpis,
    pub display: KpiDisplay,
}

#[derive(Debug, Serialize)]
pub struct DistributionSection<B> {
    pub title: String,
    pub axis_label: &'static str,
    #[serde(flatten)]
    pub table: Distribution<B>,
}

#[derive(Debug, Serialize)]
pub struct SlowMoverSection {
    pub title: String,
    pub headers: [&'static str; 5],
    pub rows: Vec<SlowMoverDisplay>,
}

#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub division: Division,
    pub selection: &'a FilterSelection,
    pub record_count: usize,
    pub kpis: Outcome<KpiSection>,
    pub sell_time: Outcome<DistributionSection<SellTimeBucket>>,
    pub margin: Outcome<DistributionSection<MarginBucket>>,
    pub slow_movers: SlowMoverSection,
    pub exports: &'a [ExportSummary],
    pub label_mismatches: &'a [LabelMismatch],
}

impl<'a> JsonReport<'a> {
    pub fn new(report: &'a PipelineReport, exports: &'a [ExportSummary]) -> Self {
        let division = report.division;
        Self {
            division,
            selection: &report.selection,
            record_count: report.record_count,
            kpis: Outcome::from_result(&report.kpis, |k| KpiSection {
                values: *k,
                display: k.display(),
            }),
            sell_time: Outcome::from_result(&report.sell_time, |d| DistributionSection {
                title: d.title(division),
                axis_label: d.axis_label(),
                table: d.clone(),
            }),
            margin: Outcome::from_result(&report.margin, |d| DistributionSection {
                title: d.title(division),
                axis_label: d.axis_label(),
                table: d.clone(),
            }),
            slow_movers: SlowMoverSection {
                title: format!(
                    "TOP {} DE ITEMS CON MOVIMIENTO LENTO",
                    report.slow_mover_limit
                ),
                headers: crate::analytics::SlowMoverRow::HEADERS,
                rows: report.slow_movers.iter().map(|r| r.display()).collect(),
            },
            exports,
            label_mismatches: &report.label_mismatches,
        }
    }
}

pub fn render_report(report: &PipelineReport, exports: &[ExportSummary]) -> Result<String> {
    Ok(serde_json::to_string_pretty(&JsonReport::new(report, exports))?)
}

#[derive(Debug, Serialize)]
struct EmptyNotice<'a> {
    notice: &'static str,
    error: ErrorSummary,
    division: Division,
    selection: &'a FilterSelection,
}

/// JSON body for a selection that matched nothing.
pub fn render_empty_notice(
    error: &AnalyticsError,
    division: Division,
    selection: &FilterSelection,
) -> Result<String> {
    Ok(serde_json::to_string_pretty(&EmptyNotice {
        notice: EMPTY_SELECTION_NOTICE,
        error: error.into(),
        division,
        selection,
    })?)
}

#[derive(Debug, Serialize)]
struct OptionsBody<'a> {
    division: Division,
    #[serde(flatten)]
    options: &'a FilterOptions,
}

pub fn render_options(division: Division, options: &FilterOptions) -> Result<String> {
    Ok(serde_json::to_string_pretty(&OptionsBody { division, options })?)
}
