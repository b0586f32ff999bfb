// src/export/xlsx.rs

use crate::errors::{AppError, AppResult};
use crate::export::excel_date::{DATE_FORMAT, naive_date_to_excel_serial};
use crate::export::model::{Cell, ColumnKind, ReportTable};
use crate::export::notify_export_success;
use crate::ui::messages::info;
use rust_xlsxwriter::{Format, Table, TableColumn, Workbook, Worksheet};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

const MONEY_FORMAT: &str = "$#,##0.00;[Red]$#,##0.00";

/// Write a report table to `path`.
pub fn export_xlsx(table: &ReportTable, path: &Path) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = build_workbook(table)?;
    workbook.save(path).map_err(to_export_error)?;

    notify_export_success("XLSX", path);
    Ok(())
}

/// In-memory workbook, for a download response.
pub fn xlsx_bytes(table: &ReportTable) -> AppResult<Vec<u8>> {
    let mut workbook = build_workbook(table)?;
    workbook.save_to_buffer().map_err(to_export_error)
}

fn build_workbook(table: &ReportTable) -> AppResult<Workbook> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let money = Format::new().set_num_format(MONEY_FORMAT);
    let date = Format::new().set_num_format(DATE_FORMAT);
    let wrap = Format::new().set_text_wrap();

    for (row_index, cells) in table.rows.iter().enumerate() {
        let row = (row_index + 1) as u32;

        for (col_index, (cell, column)) in cells.iter().zip(&table.columns).enumerate() {
            let col = col_index as u16;
            let format = match (column.kind, cell) {
                (_, Cell::Date(_)) => Some(&date),
                (ColumnKind::Money, _) => Some(&money),
                (ColumnKind::Notes, _) => Some(&wrap),
                _ => None,
            };
            write_cell(worksheet, row, col, cell, format)?;
        }
    }

    for (col, width) in column_widths(table).into_iter().enumerate() {
        worksheet
            .set_column_width(col as u16, width as f64)
            .map_err(to_export_error)?;
    }

    // Excel tables need at least one data row below the header.
    let last_row = table.rows.len().max(1) as u32;
    let last_col = table.columns.len().saturating_sub(1) as u16;
    let columns: Vec<TableColumn> = table
        .columns
        .iter()
        .map(|c| TableColumn::new().set_header(c.header.as_str()))
        .collect();
    let excel_table = Table::new()
        .set_name(table.table_name.as_str())
        .set_columns(&columns);

    worksheet
        .add_table(0, 0, last_row, last_col, &excel_table)
        .map_err(to_export_error)?;

    Ok(workbook)
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &Cell,
    format: Option<&Format>,
) -> AppResult<()> {
    let result = match (cell, format) {
        (Cell::Empty, _) => return Ok(()),
        (Cell::Text(s), Some(f)) => worksheet.write_string_with_format(row, col, s, f),
        (Cell::Text(s), None) => worksheet.write_string(row, col, s),
        (Cell::Number(n), Some(f)) => worksheet.write_number_with_format(row, col, *n, f),
        (Cell::Number(n), None) => worksheet.write_number(row, col, *n),
        (Cell::Date(d), Some(f)) => {
            worksheet.write_number_with_format(row, col, naive_date_to_excel_serial(*d), f)
        }
        (Cell::Date(d), None) => worksheet.write_number(row, col, naive_date_to_excel_serial(*d)),
        (Cell::Bool(b), _) => worksheet.write_boolean(row, col, *b),
    };
    result.map_err(to_export_error)?;
    Ok(())
}

/// Column widths in characters.
pub(crate) fn column_widths(table: &ReportTable) -> Vec<usize> {
    let mut widths: Vec<usize> = table
        .columns
        .iter()
        .map(|c| UnicodeWidthStr::width(c.header.as_str()))
        .collect();

    for cells in &table.rows {
        for (col, (cell, column)) in cells.iter().zip(&table.columns).enumerate() {
            let len = UnicodeWidthStr::width(cell.display().as_str());
            widths[col] = match column.kind {
                ColumnKind::Account => len.max(10),
                ColumnKind::JobNumber => len.max(14),
                ColumnKind::Notes => 40,
                ColumnKind::LongText => 100,
                ColumnKind::Flag => 9,
                _ => widths[col].max(len),
            };
        }
    }

    widths
}

fn to_export_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::model::ColumnSpec;
    use chrono::NaiveDate;

    fn sample() -> ReportTable {
        let mut t = ReportTable::new(
            "SalesSummary",
            vec![
                ColumnSpec::new("Job Number", ColumnKind::JobNumber),
                ColumnSpec::new("Invoice Date", ColumnKind::Date),
                ColumnSpec::new("Amount", ColumnKind::Money),
                ColumnSpec::new("Part Description", ColumnKind::LongText),
                ColumnSpec::new("Job Notes", ColumnKind::Notes),
                ColumnSpec::new("Active", ColumnKind::Flag),
            ],
        );
        t.push_row(vec![
            "J1".into(),
            NaiveDate::from_ymd_opt(2024, 3, 4).unwrap().into(),
            (-1250.5).into(),
            "Bracket, welded".into(),
            Cell::Empty,
            true.into(),
        ])
        .unwrap();
        t
    }

    #[test]
    fn widths_follow_column_kind() {
        assert_eq!(column_widths(&sample()), vec![14, 12, 7, 100, 40, 9]);
    }

    #[test]
    fn widths_without_rows_are_header_widths() {
        let mut t = sample();
        t.rows.clear();
        assert_eq!(column_widths(&t), vec![10, 12, 6, 16, 9, 6]);
    }

    #[test]
    fn workbook_is_a_zip_archive() {
        let bytes = xlsx_bytes(&sample()).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn empty_table_still_writes() {
        let mut t = sample();
        t.rows.clear();
        assert!(xlsx_bytes(&t).is_ok());
    }
}
