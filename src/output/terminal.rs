//! Terminal rendering of a pipeline report.

use super::{ExportSummary, EMPTY_SELECTION_NOTICE};
use crate::analytics::{Bucket, Distribution, FilterOptions, Metric, SlowMoverRow};
use crate::dataset::Division;
use crate::error::{AnalyticsError, Result as AnalyticsResult};
use crate::formatting::{OutputFormatter, Tone};
use crate::pipeline::PipelineReport;
use comfy_table::{presets, Cell, CellAlignment, ContentArrangement, Table};
use std::fmt::Write;

const BAR_WIDTH: usize = 30;

/// Rendering switches for the terminal.
pub struct TerminalStyle<'a> {
    pub formatter: &'a dyn OutputFormatter,
    /// Restrict table borders and bars to ASCII
    pub ascii: bool,
}

impl TerminalStyle<'_> {
    fn table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(if self.ascii {
                presets::ASCII_FULL
            } else {
                presets::UTF8_FULL
            })
            .set_content_arrangement(ContentArrangement::Dynamic);
        table
    }

    fn bar_char(&self) -> char {
        if self.ascii {
            '#'
        } else {
            '█'
        }
    }
}

pub fn render_report(
    report: &PipelineReport,
    exports: &[ExportSummary],
    style: &TerminalStyle<'_>,
) -> String {
    let fmt = style.formatter;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{}",
        fmt.header(&format!("INVENTARIO - {}", report.division))
    );
    let _ = writeln!(
        out,
        "{}",
        fmt.dim(&format!(
            "{} ({} productos)",
            report.selection.describe(report.division),
            report.record_count
        ))
    );
    out.push('\n');

    render_kpis(&mut out, report, style);
    render_distribution(&mut out, &report.sell_time, report.division, style);
    render_distribution(&mut out, &report.margin, report.division, style);
    render_slow_movers(&mut out, &report.slow_movers, report.slow_mover_limit, style);
    render_exports(&mut out, exports, style);

    if !report.label_mismatches.is_empty() {
        let _ = writeln!(
            out,
            "{}",
            fmt.warning(&format!(
                "{} etiquetas precalculadas no coinciden con la clasificación",
                report.label_mismatches.len()
            ))
        );
    }

    out.trim_end().to_string()
}

fn render_error(out: &mut String, error: &AnalyticsError, style: &TerminalStyle<'_>) {
    let _ = writeln!(
        out,
        "{}\n",
        style
            .formatter
            .error(&format!("[{}] {}", error.code(), error))
    );
}

fn render_kpis(out: &mut String, report: &PipelineReport, style: &TerminalStyle<'_>) {
    let kpis = match &report.kpis {
        Ok(kpis) => kpis.display(),
        Err(e) => return render_error(out, e, style),
    };
    let entries = kpis.entries();
    let mut table = style.table();
    table.set_header(entries.iter().map(|(caption, _)| *caption).collect::<Vec<_>>());
    table.add_row(
        entries
            .iter()
            .map(|(_, value)| Cell::new(value).set_alignment(CellAlignment::Right))
            .collect::<Vec<_>>(),
    );
    let _ = writeln!(out, "{table}\n");
}

/// Tone of a bucket; index 0 of the sell-time scheme is the best, the
/// margin scheme runs from worst to best.
fn bucket_tone<B: Bucket>(bucket: B) -> Tone {
    let len = B::ALL.len();
    let rank = match B::METRIC {
        Metric::SellTime => bucket.ordinal(),
        Metric::Margin => len - 1 - bucket.ordinal(),
    };
    Tone::from_rank(rank, len)
}

fn render_distribution<B: Bucket>(
    out: &mut String,
    distribution: &AnalyticsResult<Distribution<B>>,
    division: Division,
    style: &TerminalStyle<'_>,
) {
    let fmt = style.formatter;
    let dist = match distribution {
        Ok(dist) => dist,
        Err(e) => return render_error(out, e, style),
    };

    let _ = writeln!(out, "{}", fmt.header(&dist.title(division)));
    let _ = writeln!(
        out,
        "{}",
        fmt.caption(&format!(
            "  {:<14}{:<width$} {:>8} {:>11}",
            dist.axis_label(),
            "",
            "Cantidad",
            "Porcentaje",
            width = BAR_WIDTH
        ))
    );
    for row in &dist.rows {
        let filled = ((row.percentage / 100.0) * BAR_WIDTH as f64).round() as usize;
        let bar: String = std::iter::repeat(style.bar_char())
            .take(filled.min(BAR_WIDTH))
            .collect();
        let padded = format!("{bar:<width$}", width = BAR_WIDTH);
        let _ = writeln!(
            out,
            "  {:<14}{} {:>8} {:>10.1}%",
            row.display,
            fmt.tone(&padded, bucket_tone(row.bucket)),
            row.count,
            row.percentage
        );
    }
    out.push('\n');
}

fn render_slow_movers(
    out: &mut String,
    rows: &[SlowMoverRow],
    limit: usize,
    style: &TerminalStyle<'_>,
) {
    let fmt = style.formatter;
    let _ = writeln!(
        out,
        "{}",
        fmt.header(&format!("TOP {limit} DE ITEMS CON MOVIMIENTO LENTO"))
    );
    if rows.is_empty() {
        let _ = writeln!(out, "{}\n", fmt.dim("Sin productos con stock"));
        return;
    }

    let mut table = style.table();
    table.set_header(SlowMoverRow::HEADERS.to_vec());
    for row in rows {
        let display = row.display();
        table.add_row(vec![
            Cell::new(display.name),
            Cell::new(display.brand),
            Cell::new(display.days).set_alignment(CellAlignment::Right),
            Cell::new(display.profit).set_alignment(CellAlignment::Right),
            Cell::new(display.stock).set_alignment(CellAlignment::Right),
        ]);
    }
    let _ = writeln!(out, "{table}\n");
}

fn render_exports(out: &mut String, exports: &[ExportSummary], style: &TerminalStyle<'_>) {
    if exports.is_empty() {
        return;
    }
    let fmt = style.formatter;
    let _ = writeln!(out, "{}", fmt.header("DESCARGAS"));
    for export in exports {
        let line = match (&export.error, &export.path, export.rows) {
            (Some(error), _, _) => fmt.error(&format!(
                "  {}: [{}] {}",
                export.label, error.code, error.message
            )),
            (None, Some(path), Some(rows)) => format!(
                "  {}: {} ({} filas)",
                fmt.caption(export.label),
                path.display(),
                rows
            ),
            (None, _, rows) => format!(
                "  {}: {} ({} filas, no guardado)",
                fmt.caption(export.label),
                export.file_name,
                rows.unwrap_or_default()
            ),
        };
        let _ = writeln!(out, "{line}");
    }
    out.push('\n');
}

/// Notice for a selection that matched nothing.
pub fn render_empty_notice(error: &AnalyticsError, formatter: &dyn OutputFormatter) -> String {
    format!(
        "{}\n{}",
        formatter.warning(EMPTY_SELECTION_NOTICE),
        formatter.dim(&error.to_string())
    )
}

/// Selector values available within a division.
pub fn render_options(
    division: Division,
    options: &FilterOptions,
    style: &TerminalStyle<'_>,
) -> String {
    let fmt = style.formatter;
    let mut out = String::new();
    let _ = writeln!(out, "{}", fmt.header(&format!("FILTROS - {division}")));
    for (caption, values) in [
        ("Categoría", &options.categories),
        ("Subcategoría", &options.subcategories),
        ("Marca", &options.brands),
    ] {
        let _ = writeln!(out, "{}", fmt.caption(caption));
        for value in values {
            let _ = writeln!(out, "  {value}");
        }
    }
    out.trim_end().to_string()
}
