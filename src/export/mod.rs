// src/export/mod.rs

mod excel_date;
mod fs_utils;
pub mod model;
pub mod xlsx;

pub use fs_utils::ensure_writable;
pub use model::{Cell, ColumnKind, ColumnSpec, ReportTable, job_notes_table, report_filename};
pub use xlsx::{export_xlsx, xlsx_bytes};

use crate::ui::messages::success;
use std::path::Path;

/// Shared completion message for exports.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}
