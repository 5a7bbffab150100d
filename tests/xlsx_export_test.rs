//! Generated workbooks read back with calamine.

mod common;

use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
use common::{warehouse_ten, write_csv};
use pretty_assertions::assert_eq;
use std::collections::HashMap;
use std::io::{Cursor, Read};
use stocklens::report::{self, XLSX_MIME};
use stocklens::{build_export, load_dataset, Division, ExportKind};
use tempfile::TempDir;

fn rows_of(kind: ExportKind) -> (Vec<String>, Vec<Vec<Data>>) {
    let dir = TempDir::new().unwrap();
    let path = write_csv(dir.path(), "stock.csv", &warehouse_ten());
    let dataset = load_dataset(&path).unwrap();
    let subset = dataset.division(Division::Warehouse);
    let export = build_export(kind, &subset, 2).unwrap();
    assert_eq!(export.mime, XLSX_MIME);

    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(export.bytes)).unwrap();
    let names = workbook.sheet_names().to_vec();
    let range = workbook.worksheet_range(kind.sheet_name()).unwrap();
    let rows = range.rows().map(|r| r.to_vec()).collect();
    (names, rows)
}

fn text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        other => panic!("expected text, got {other:?}"),
    }
}

fn number(cell: &Data) -> f64 {
    match cell {
        Data::Float(f) => *f,
        Data::Int(i) => *i as f64,
        other => panic!("expected number, got {other:?}"),
    }
}

#[test]
fn test_urgent_workbook_layout_and_values() {
    let (names, rows) = rows_of(ExportKind::UrgentWithStock);
    assert_eq!(names, vec![">180_dias".to_string()]);

    let headers: Vec<String> = rows[0].iter().map(text).collect();
    assert_eq!(
        headers,
        vec![
            "CODIGO",
            "PRODUCTO",
            "DIAS PROMEDIO VENTAS",
            "UTILIDAD NETA PROMEDIO [$]",
            "STOCK",
            "UNIDADES VENDIDAS"
        ]
    );
    assert_eq!(rows.len(), 4);
    assert_eq!(text(&rows[1][0]), "W02");
    // the integer format is display-only
    assert_eq!(number(&rows[1][2]), 365.5);
    assert_eq!(number(&rows[1][3]), -5.0);
    assert_eq!(number(&rows[1][4]), 4.0);
}

#[test]
fn test_star_workbook_converts_margin_to_fraction() {
    let (names, rows) = rows_of(ExportKind::NearStockoutStars);
    assert_eq!(names, vec!["0_60_dias".to_string()]);
    assert_eq!(text(&rows[0][4]), "MARGEN BRUTO [%]");
    assert_eq!(text(&rows[1][0]), "W06");
    assert!((number(&rows[1][4]) - 0.436).abs() < 1e-12);
    assert_eq!(text(&rows[2][0]), "W07");
}

#[test]
fn test_loss_workbook_order() {
    let (names, rows) = rows_of(ExportKind::LossMakers);
    assert_eq!(names, vec!["Perdida".to_string()]);
    let profits: Vec<f64> = rows[1..].iter().map(|r| number(&r[3])).collect();
    assert_eq!(profits, vec![-50.0, -5.0]);
    assert!((number(&rows[1][2]) + 0.2).abs() < 1e-12);
}

#[test]
fn test_empty_extract_still_has_headers() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(
        dir.path(),
        "stock.csv",
        &[common::Row::new("ALMACEN", "A1")],
    );
    let dataset = load_dataset(&path).unwrap();
    let export = build_export(
        ExportKind::LossMakers,
        &dataset.division(Division::Warehouse),
        2,
    )
    .unwrap();
    assert_eq!(export.rows, 0);

    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(export.bytes)).unwrap();
    let range = workbook.worksheet_range("Perdida").unwrap();
    assert_eq!(range.rows().count(), 1);
}

/// One member of the workbook zip container, as text.
fn part(bytes: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut file = archive.by_name(name).unwrap();
    let mut xml = String::new();
    file.read_to_string(&mut xml).unwrap();
    xml
}

fn attr(tag: &str, name: &str) -> Option<String> {
    let key = format!(" {name}=\"");
    let start = tag.find(&key)? + key.len();
    let end = tag[start..].find('"')?;
    Some(tag[start..start + end].replace("&quot;", "\"").replace("&amp;", "&"))
}

fn section<'a>(xml: &'a str, open: &str, close: &str) -> &'a str {
    let start = xml.find(open).unwrap();
    let end = xml[start..].find(close).unwrap();
    &xml[start..start + end]
}

/// Cell styles of the workbook: (number format code, bold).
fn cell_styles(styles: &str) -> Vec<(String, bool)> {
    let mut codes: HashMap<String, String> = [("0", "General"), ("1", "0"), ("9", "0%")]
        .into_iter()
        .map(|(id, code)| (id.to_string(), code.to_string()))
        .collect();
    if styles.contains("<numFmts") {
        for tag in section(styles, "<numFmts", "</numFmts>").split("<numFmt ").skip(1) {
            codes.insert(attr(tag, "numFmtId").unwrap(), attr(tag, "formatCode").unwrap());
        }
    }

    let fonts: Vec<bool> = section(styles, "<fonts", "</fonts>")
        .split("</font>")
        .map(|font| font.contains("<b/>"))
        .collect();

    section(styles, "<cellXfs", "</cellXfs>")
        .split("<xf ")
        .skip(1)
        .map(|tag| {
            let tag = &tag[..tag.find('>').unwrap()];
            let fmt = attr(tag, "numFmtId").unwrap_or_else(|| "0".into());
            let font: usize = attr(tag, "fontId").map_or(0, |f| f.parse().unwrap());
            (codes[&fmt].clone(), fonts[font])
        })
        .collect()
}

/// Style index of every written cell, keyed by its A1 reference.
fn cell_style_ids(sheet: &str) -> HashMap<String, usize> {
    sheet
        .split("<c r=\"")
        .skip(1)
        .map(|chunk| {
            let tag = &chunk[..chunk.find('>').unwrap()];
            let reference = tag[..tag.find('"').unwrap()].to_string();
            let style = attr(tag, "s").map_or(0, |s| s.parse().unwrap());
            (reference, style)
        })
        .collect()
}

/// Column widths keyed by zero-based column index.
fn column_widths(sheet: &str) -> HashMap<usize, f64> {
    let mut widths = HashMap::new();
    if !sheet.contains("<cols>") {
        return widths;
    }
    for tag in section(sheet, "<cols>", "</cols>").split("<col ").skip(1) {
        let min: usize = attr(tag, "min").unwrap().parse().unwrap();
        let max: usize = attr(tag, "max").unwrap().parse().unwrap();
        let width: f64 = attr(tag, "width").unwrap().parse().unwrap();
        for col in min..=max {
            widths.insert(col - 1, width);
        }
    }
    widths
}

#[test]
fn test_loss_workbook_formats_and_widths() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(dir.path(), "stock.csv", &warehouse_ten());
    let dataset = load_dataset(&path).unwrap();
    let subset = dataset.division(Division::Warehouse);
    let kind = ExportKind::LossMakers;
    let export = build_export(kind, &subset, 2).unwrap();
    assert_eq!(export.rows, 2);

    let styles = cell_styles(&part(&export.bytes, "xl/styles.xml"));
    let cells = cell_style_ids(&part(&export.bytes, "xl/worksheets/sheet1.xml"));
    let style_of = |reference: &str| styles[cells[reference]].clone();

    // bold header without any number format
    for col in ["A", "B", "C", "D", "E", "F"] {
        assert_eq!(style_of(&format!("{col}1")), ("General".to_string(), true), "{col}1");
    }
    // MARGEN BRUTO [%] and UTILIDAD NETA PROMEDIO [$] on every data row
    for row in 2..=3 {
        assert_eq!(style_of(&format!("C{row}")), ("0%".to_string(), false));
        assert_eq!(
            style_of(&format!("D{row}")),
            ("\"$\"#,##0.00_-".to_string(), false)
        );
        for col in ["A", "B", "E", "F"] {
            assert_eq!(style_of(&format!("{col}{row}")).0, "General", "{col}{row}");
        }
    }

    // longest rendered value or header, plus the margin of 2
    let table = kind.extract(&subset).unwrap();
    let sheet = report::format(&table, &kind.sheet_spec(), 2).unwrap();
    let written = column_widths(&part(&export.bytes, "xl/worksheets/sheet1.xml"));
    assert_eq!(sheet.widths[3], Some(28.0));
    for (col, expected) in sheet.widths.iter().enumerate() {
        let expected = expected.unwrap();
        let actual = written[&col];
        // Excel stores widths with a sub-character padding
        assert!(
            actual >= expected && actual < expected + 1.0,
            "column {col}: {actual} vs {expected}"
        );
    }
}
