//! In-memory xlsx generation for formatted sheets.

use super::sheet::Sheet;
use super::table::CellValue;
use crate::error::Result;
use rust_xlsxwriter::{Format, Workbook};

/// Render a single-sheet workbook and return its bytes.
///
/// The header row is bold. Number formats apply to data rows only;
/// non-finite numbers are left blank.
pub fn write_workbook(sheet: &Sheet) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let column_formats: Vec<Option<Format>> = sheet
        .formats
        .iter()
        .map(|f| f.code().map(|code| Format::new().set_num_format(code)))
        .collect();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet.name.as_str())?;

    for (col, header) in sheet.headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, header.as_str(), &header_format)?;
    }

    for (r, row) in sheet.rows.iter().enumerate() {
        let row_num = (r + 1) as u32;
        for (c, cell) in row.iter().enumerate() {
            let col = c as u16;
            let number = match cell {
                CellValue::Text(text) => {
                    worksheet.write_string(row_num, col, text.as_str())?;
                    continue;
                }
                CellValue::Number(x) if !x.is_finite() => continue,
                CellValue::Number(x) => *x,
                CellValue::Integer(n) => *n as f64,
            };
            match &column_formats[c] {
                Some(format) => {
                    worksheet.write_number_with_format(row_num, col, number, format)?;
                }
                None => {
                    worksheet.write_number(row_num, col, number)?;
                }
            }
        }
    }

    for (col, width) in sheet.widths.iter().enumerate() {
        if let Some(width) = width {
            worksheet.set_column_width(col as u16, *width)?;
        }
    }

    let bytes = workbook.save_to_buffer()?;
    log::debug!("Wrote workbook '{}' ({} bytes)", sheet.name, bytes.len());
    Ok(bytes)
}
