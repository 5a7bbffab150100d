use super::{formatting_for, load, resolve_data_path, resolve_division};
use crate::analytics::FilterSelection;
use crate::cli::OutputFormat;
use crate::config::StocklensConfig;
use crate::dataset::Division;
use crate::formatting::formatter_for;
use crate::output::{self, json, terminal, ExportSummary};
use crate::pipeline::{self, PipelineReport, PipelineRequest};
use crate::report::{ExportFile, ExportKind};
use anyhow::Result;
use std::path::{Path, PathBuf};

pub struct ReportConfig {
    pub data: Option<PathBuf>,
    pub division: Option<Division>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub brand: Option<String>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub export_dir: Option<PathBuf>,
    pub no_export: bool,
    pub top: Option<usize>,
    pub plain: bool,
}

/// How a report run ended when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportOutcome {
    /// Every branch succeeded
    Complete,
    /// The report was rendered but some branches failed
    Partial,
    /// The selection matched nothing; a notice was printed
    EmptySelection,
}

pub fn run_report(config: ReportConfig, settings: &StocklensConfig) -> Result<ReportOutcome> {
    let path = resolve_data_path(config.data.clone(), settings)?;
    let division = resolve_division(config.division, settings);
    let selection = FilterSelection::from_values(
        config.category.clone(),
        config.subcategory.clone(),
        config.brand.clone(),
    );

    let dataset = load(&path)?;

    let mut request = PipelineRequest::new(division)
        .with_selection(selection.clone())
        .with_top_slow_movers(config.top.unwrap_or(settings.display.top_slow_movers))
        .with_column_margin(settings.export.column_margin);
    if config.no_export {
        request = request.without_exports();
    }

    let report = match pipeline::run(&dataset, &request) {
        Ok(report) => report,
        Err(e) if e.is_empty_result() => {
            log::info!("{e}");
            let content = match config.format {
                OutputFormat::Json => json::render_empty_notice(&e, division, &selection)?,
                OutputFormat::Terminal => {
                    let formatter = formatter_for(formatting_for(config.plain));
                    terminal::render_empty_notice(&e, formatter.as_ref())
                }
            };
            output::emit(&content, config.output.as_deref())?;
            return Ok(ReportOutcome::EmptySelection);
        }
        Err(e) => return Err(e.into()),
    };

    let export_dir = config
        .export_dir
        .clone()
        .or_else(|| settings.export.directory.clone())
        .unwrap_or_else(|| PathBuf::from("."));
    let exports = save_exports(&report, &export_dir);

    let content = match config.format {
        OutputFormat::Json => json::render_report(&report, &exports)?,
        OutputFormat::Terminal => {
            let formatter = formatter_for(formatting_for(config.plain));
            terminal::render_report(
                &report,
                &exports,
                &terminal::TerminalStyle {
                    formatter: formatter.as_ref(),
                    ascii: config.plain,
                },
            )
        }
    };
    output::emit(&content, config.output.as_deref())?;

    let all_saved = exports.iter().all(|export| export.error.is_none());
    Ok(if report.is_complete() && all_saved {
        ReportOutcome::Complete
    } else {
        ReportOutcome::Partial
    })
}

/// Write every successful export into `dir`.
///
/// Build and write failures are both recorded in the summary of the export
/// concerned; the remaining exports are still written.
fn save_exports(report: &PipelineReport, dir: &Path) -> Vec<ExportSummary> {
    report
        .exports
        .iter()
        .map(|(kind, result)| save_export(*kind, result, dir))
        .collect()
}

fn save_export(
    kind: ExportKind,
    result: &crate::error::Result<ExportFile>,
    dir: &Path,
) -> ExportSummary {
    let file = match result {
        Ok(file) => file,
        Err(e) => return ExportSummary::failed(kind, e),
    };
    let path = dir.join(file.file_name);
    match crate::io::write_bytes(&path, &file.bytes) {
        Ok(()) => {
            log::info!("Saved {} ({} rows)", path.display(), file.rows);
            ExportSummary::built(file, Some(path))
        }
        Err(e) => {
            log::warn!("Could not save {}: {e:#}", path.display());
            ExportSummary::unwritten(file, &e)
        }
    }
}
