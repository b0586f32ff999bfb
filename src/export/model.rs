// src/export/model.rs

//! Rows plus column metadata, the shape every spreadsheet export takes.

use crate::core::date_range::DateWindow;
use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// How a column is written and sized in the workbook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Number,
    Date,
    /// Currency, red when negative.
    Money,
    /// GL account codes: at least 10 wide.
    Account,
    /// At least 14 wide, fits "Job Number".
    JobNumber,
    /// Wrapped free text, fixed width 40.
    Notes,
    /// Part descriptions, fixed width 100.
    LongText,
    /// TRUE / FALSE, fixed width 9.
    Flag,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDate),
    Bool(bool),
}

impl Cell {
    /// Printed form, used to size columns.
    pub fn display(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => n.to_string(),
            Cell::Date(d) => d.format("%Y-%m-%d").to_string(),
            Cell::Bool(b) => (if *b { "TRUE" } else { "FALSE" }).to_string(),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Number(n)
    }
}

impl From<NaiveDate> for Cell {
    fn from(d: NaiveDate) -> Self {
        Cell::Date(d)
    }
}

impl From<bool> for Cell {
    fn from(b: bool) -> Self {
        Cell::Bool(b)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Cell::Empty)
    }
}

#[derive(Debug, Clone)]
pub struct ColumnSpec {
    pub header: String,
    pub kind: ColumnKind,
}

impl ColumnSpec {
    pub fn new(header: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            header: header.into(),
            kind,
        }
    }
}

/// A named Excel table: headers, kinds and the data rows.
#[derive(Debug, Clone)]
pub struct ReportTable {
    pub table_name: String,
    pub columns: Vec<ColumnSpec>,
    pub rows: Vec<Vec<Cell>>,
}

impl ReportTable {
    pub fn new(table_name: impl Into<String>, columns: Vec<ColumnSpec>) -> Self {
        Self {
            table_name: table_name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<Cell>) -> AppResult<()> {
        if row.len() != self.columns.len() {
            return Err(AppError::Export(format!(
                "row has {} cells, table {} has {} columns",
                row.len(),
                self.table_name,
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }
}

/// `Sales Summary (2024-03-01 to 2024-03-31).xlsx`, or `Contacts.xlsx` without a window.
pub fn report_filename(title: &str, window: Option<&DateWindow>) -> String {
    match window {
        Some(w) => format!("{title} ({}).xlsx", w.label()),
        None => format!("{title}.xlsx"),
    }
}

pub fn job_notes_table(notes: &BTreeMap<String, String>) -> AppResult<ReportTable> {
    let mut table = ReportTable::new(
        "JobNotes",
        vec![
            ColumnSpec::new("Job Number", ColumnKind::JobNumber),
            ColumnSpec::new("Job Notes", ColumnKind::Notes),
        ],
    );
    for (job, text) in notes {
        table.push_row(vec![job.as_str().into(), text.as_str().into()])?;
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_with_and_without_window() {
        let w = DateWindow::new(
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        );
        assert_eq!(
            report_filename("Sales Summary", Some(&w)),
            "Sales Summary (2024-03-01 to 2024-03-31).xlsx"
        );
        assert_eq!(report_filename("Contacts", None), "Contacts.xlsx");
    }

    #[test]
    fn push_row_checks_arity() {
        let mut t = ReportTable::new("T", vec![ColumnSpec::new("A", ColumnKind::Text)]);
        assert!(t.push_row(vec![Cell::Empty]).is_ok());
        assert!(matches!(
            t.push_row(vec![Cell::Empty, Cell::Empty]),
            Err(AppError::Export(_))
        ));
    }

    #[test]
    fn cell_display() {
        assert_eq!(Cell::from(Some(12.5)).display(), "12.5");
        assert_eq!(Cell::from(None::<&str>).display(), "");
        assert_eq!(Cell::Bool(false).display(), "FALSE");
    }
}
