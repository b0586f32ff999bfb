use crate::cli::parser::Commands;
use crate::core::date_range::resolve;
use crate::errors::{AppError, AppResult};
use crate::export::report_filename;
use crate::ui::messages::info;
use crate::utils::date::{parse_date, today};

/// Print the window a report would query, as `START END`, then the export file name.
pub fn handle(cmd: &Commands) -> AppResult<()> {
    if let Commands::Range {
        report,
        start,
        end,
        today: anchor,
    } = cmd
    {
        let anchor = match anchor {
            Some(raw) => parse_date(Some(raw)).ok_or_else(|| AppError::InvalidDate(raw.clone()))?,
            None => today(),
        };

        let window = resolve(*report, start.as_deref(), end.as_deref(), anchor);
        tracing::debug!(report = %report, %window, "resolved report window");
        println!("{window}");
        info(format!(
            "Spreadsheet: {}",
            report_filename(report.title(), Some(&window))
        ));
    }

    Ok(())
}
