use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook};

use crate::domains::export::record::CellValue;
use crate::domains::export::types::{ExportError, ExportResult};

const MAX_COLUMN_WIDTH_PX: u16 = 200;

/// Column width heuristic: ten pixels per header character, capped.
/// Cell contents are not measured, so long values may clip.
pub fn column_width_px(header: &str) -> u16 {
    MAX_COLUMN_WIDTH_PX.min((header.len() as u16).saturating_mul(10))
}

/// Builds a single-sheet workbook and returns the XLSX bytes as base64.
pub fn build_workbook_base64(
    sheet_name: &str,
    headers: &[&'static str],
    rows: &[Vec<CellValue>],
) -> ExportResult<String> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(sheet_name)
        .map_err(|e| ExportError::Serialization(e.to_string()))?;

    let header_format = Format::new()
        .set_bold()
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);

    let body_format = Format::new()
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);

    for (col, header) in headers.iter().enumerate() {
        let col = col as u16;
        worksheet
            .write_string_with_format(0, col, *header, &header_format)
            .map_err(|e| ExportError::Serialization(e.to_string()))?;
        worksheet
            .set_column_width_pixels(col, column_width_px(header))
            .map_err(|e| ExportError::Serialization(e.to_string()))?;
    }

    for (row_index, row) in rows.iter().enumerate() {
        let row_number = (row_index + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            let col = col as u16;
            match cell {
                CellValue::Text(text) => {
                    worksheet.write_string_with_format(row_number, col, text, &body_format)
                }
                CellValue::Number(value) => {
                    worksheet.write_number_with_format(row_number, col, *value, &body_format)
                }
            }
            .map_err(|e| ExportError::Serialization(e.to_string()))?;
        }
    }

    let bytes = workbook
        .save_to_buffer()
        .map_err(|e| ExportError::Serialization(e.to_string()))?;

    Ok(BASE64_STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_width_heuristic() {
        assert_eq!(column_width_px("ID"), 20);
        assert_eq!(column_width_px("Product Name"), 120);
        assert_eq!(column_width_px("Partial Payment Due Date"), 200);
    }

    #[test]
    fn test_workbook_payload_is_base64_xlsx() {
        let rows = vec![vec![
            CellValue::Text("Masala".to_string()),
            CellValue::Number(40.0),
        ]];
        let payload =
            build_workbook_base64("Product Inventory", &["Product Name", "Quantity"], &rows)
                .unwrap();

        let bytes = BASE64_STANDARD.decode(payload).unwrap();
        // XLSX is a zip archive
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_workbook_with_header_row_only() {
        let payload = build_workbook_base64("Orders", &["Order id"], &[]).unwrap();
        let bytes = BASE64_STANDARD.decode(payload).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }
}
