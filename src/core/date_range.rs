// src/core/date_range.rs

//! Date-window resolution for the date-bounded reports.
//!
//! Every report takes an optional `start_date` / `end_date` pair straight from
//! the request. Missing or unparsable values fall back to a per-report default
//! window, and the result is always ordered (`start <= end`).

use crate::errors::AppError;
use crate::utils::date::{first_of_month, last_of_month, parse_date, today};
use chrono::{Days, NaiveDate};
use clap::ValueEnum;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Span of the action summary window when only one bound is given.
pub const ACTION_SUMMARY_SPAN_DAYS: u64 = 30;

/// Span of the job performance window, both for the default and for one-sided input.
pub const JOB_PERFORMANCE_SPAN_DAYS: u64 = 7;

/// A validated `(start_date, end_date)` pair bounding a report query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl DateWindow {
    /// Build a window, swapping the bounds if they arrive reversed.
    pub fn new(a: NaiveDate, b: NaiveDate) -> Self {
        if a > b {
            Self {
                start_date: b,
                end_date: a,
            }
        } else {
            Self {
                start_date: a,
                end_date: b,
            }
        }
    }

    /// `2024-03-01 to 2024-03-31`, the form used in export file names.
    pub fn label(&self) -> String {
        format!("{} to {}", self.start_date, self.end_date)
    }

    pub fn contains(&self, d: NaiveDate) -> bool {
        self.start_date <= d && d <= self.end_date
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.start_date, self.end_date)
    }
}

/// The report families that accept a date range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum, Serialize)]
pub enum ReportKind {
    ActionSummary,
    IncomeStatements,
    JobPerformance,
    SalesSummary,
}

impl ReportKind {
    pub const ALL: [ReportKind; 4] = [
        ReportKind::ActionSummary,
        ReportKind::IncomeStatements,
        ReportKind::JobPerformance,
        ReportKind::SalesSummary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::ActionSummary => "action-summary",
            ReportKind::IncomeStatements => "income-statements",
            ReportKind::JobPerformance => "job-performance",
            ReportKind::SalesSummary => "sales-summary",
        }
    }

    /// Human title, also the stem of the exported spreadsheet name.
    pub fn title(&self) -> &'static str {
        match self {
            ReportKind::ActionSummary => "Action Summary",
            ReportKind::IncomeStatements => "Income Statement",
            ReportKind::JobPerformance => "Job Performance",
            ReportKind::SalesSummary => "Sales Summary",
        }
    }

    /// Key under which the page-lock gate stores this report.
    pub fn page_key(&self) -> String {
        self.as_str().replace('-', "_")
    }

    /// Window used when the request carries no usable date at all.
    fn default_window(self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self {
            ReportKind::ActionSummary | ReportKind::IncomeStatements => {
                (first_of_month(today), today)
            }
            ReportKind::JobPerformance => {
                (days_before(today, JOB_PERFORMANCE_SPAN_DAYS), today)
            }
            ReportKind::SalesSummary => (first_of_month(today), last_of_month(today)),
        }
    }

    /// Start derived from an end date given alone.
    fn start_from_end(self, end: NaiveDate) -> NaiveDate {
        match self {
            ReportKind::ActionSummary => days_before(end, ACTION_SUMMARY_SPAN_DAYS),
            ReportKind::JobPerformance => days_before(end, JOB_PERFORMANCE_SPAN_DAYS),
            ReportKind::IncomeStatements | ReportKind::SalesSummary => first_of_month(end),
        }
    }

    /// End derived from a start date given alone.
    fn end_from_start(self, start: NaiveDate, today: NaiveDate) -> NaiveDate {
        match self {
            ReportKind::ActionSummary => days_after(start, ACTION_SUMMARY_SPAN_DAYS),
            ReportKind::JobPerformance => days_after(start, JOB_PERFORMANCE_SPAN_DAYS),
            ReportKind::IncomeStatements => today,
            ReportKind::SalesSummary => last_of_month(start),
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportKind {
    type Err = AppError;

    /// Accepts both the URL form (`job-performance`) and the endpoint form (`job_performance`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        ReportKind::ALL
            .into_iter()
            .find(|k| k.as_str() == wanted)
            .ok_or_else(|| AppError::InvalidReport(s.to_string()))
    }
}

/// Resolve raw request values into a window for `kind`, anchored on `today`.
pub fn resolve(
    kind: ReportKind,
    start_raw: Option<&str>,
    end_raw: Option<&str>,
    today: NaiveDate,
) -> DateWindow {
    let start = parse_date(start_raw);
    let end = parse_date(end_raw);

    let (start, end) = match (start, end) {
        (None, None) => kind.default_window(today),
        (None, Some(end)) => (kind.start_from_end(end), end),
        (Some(start), None) => (start, kind.end_from_start(start, today)),
        (Some(start), Some(end)) => (start, end),
    };

    // An income statement started after today ends up reversed here too.
    DateWindow::new(start, end)
}

/// Same as [`resolve`], anchored on the local calendar date.
pub fn resolve_today(
    kind: ReportKind,
    start_raw: Option<&str>,
    end_raw: Option<&str>,
) -> DateWindow {
    resolve(kind, start_raw, end_raw, today())
}

pub fn action_summary(start_raw: Option<&str>, end_raw: Option<&str>) -> DateWindow {
    resolve_today(ReportKind::ActionSummary, start_raw, end_raw)
}

pub fn income_statements(start_raw: Option<&str>, end_raw: Option<&str>) -> DateWindow {
    resolve_today(ReportKind::IncomeStatements, start_raw, end_raw)
}

pub fn job_performance(start_raw: Option<&str>, end_raw: Option<&str>) -> DateWindow {
    resolve_today(ReportKind::JobPerformance, start_raw, end_raw)
}

pub fn sales_summary(start_raw: Option<&str>, end_raw: Option<&str>) -> DateWindow {
    resolve_today(ReportKind::SalesSummary, start_raw, end_raw)
}

fn days_before(d: NaiveDate, n: u64) -> NaiveDate {
    d.checked_sub_days(Days::new(n)).unwrap_or(NaiveDate::MIN)
}

fn days_after(d: NaiveDate, n: u64) -> NaiveDate {
    d.checked_add_days(Days::new(n)).unwrap_or(NaiveDate::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn window(a: &str, b: &str) -> DateWindow {
        DateWindow {
            start_date: d(a),
            end_date: d(b),
        }
    }

    const TODAY: &str = "2024-03-15";

    #[test]
    fn defaults_per_report() {
        let today = d(TODAY);
        assert_eq!(
            resolve(ReportKind::ActionSummary, None, None, today),
            window("2024-03-01", "2024-03-15")
        );
        assert_eq!(
            resolve(ReportKind::IncomeStatements, None, None, today),
            window("2024-03-01", "2024-03-15")
        );
        assert_eq!(
            resolve(ReportKind::JobPerformance, None, None, today),
            window("2024-03-08", "2024-03-15")
        );
        assert_eq!(
            resolve(ReportKind::SalesSummary, None, None, today),
            window("2024-03-01", "2024-03-31")
        );
    }

    #[test]
    fn job_performance_start_only_spans_seven_days() {
        let w = resolve(ReportKind::JobPerformance, Some("2024-01-10"), None, d(TODAY));
        assert_eq!(w, window("2024-01-10", "2024-01-17"));
    }

    #[test]
    fn job_performance_end_only_goes_back_seven_days() {
        let w = resolve(ReportKind::JobPerformance, None, Some("2024-01-10"), d(TODAY));
        assert_eq!(w, window("2024-01-03", "2024-01-10"));
    }

    #[test]
    fn action_summary_one_sided_spans_thirty_days() {
        let today = d(TODAY);
        assert_eq!(
            resolve(ReportKind::ActionSummary, Some("2024-01-10"), None, today),
            window("2024-01-10", "2024-02-09")
        );
        assert_eq!(
            resolve(ReportKind::ActionSummary, None, Some("2024-03-31"), today),
            window("2024-03-01", "2024-03-31")
        );
    }

    #[test]
    fn income_statements_one_sided() {
        let today = d(TODAY);
        assert_eq!(
            resolve(ReportKind::IncomeStatements, None, Some("2023-11-20"), today),
            window("2023-11-01", "2023-11-20")
        );
        assert_eq!(
            resolve(ReportKind::IncomeStatements, Some("2024-02-10"), None, today),
            window("2024-02-10", "2024-03-15")
        );
        // start in the future: end defaults to today, then the pair is swapped
        assert_eq!(
            resolve(ReportKind::IncomeStatements, Some("2024-04-02"), None, today),
            window("2024-03-15", "2024-04-02")
        );
    }

    #[test]
    fn sales_summary_one_sided_uses_month_bounds() {
        let today = d(TODAY);
        assert_eq!(
            resolve(ReportKind::SalesSummary, Some("2024-02-10"), None, today),
            window("2024-02-10", "2024-02-29")
        );
        assert_eq!(
            resolve(ReportKind::SalesSummary, Some("2023-12-05"), None, today),
            window("2023-12-05", "2023-12-31")
        );
        assert_eq!(
            resolve(ReportKind::SalesSummary, None, Some("2024-02-10"), today),
            window("2024-02-01", "2024-02-10")
        );
    }

    #[test]
    fn reversed_input_is_swapped_for_every_report() {
        for kind in ReportKind::ALL {
            let w = resolve(kind, Some("2024-05-20"), Some("2024-05-01"), d(TODAY));
            assert_eq!(w, window("2024-05-01", "2024-05-20"), "{kind}");
        }
    }

    #[test]
    fn ordered_input_is_kept() {
        for kind in ReportKind::ALL {
            let w = resolve(kind, Some("2022-01-01"), Some("2022-06-30"), d(TODAY));
            assert_eq!(w, window("2022-01-01", "2022-06-30"));
        }
    }

    #[test]
    fn garbage_is_treated_as_missing() {
        let today = d(TODAY);
        for kind in ReportKind::ALL {
            assert_eq!(
                resolve(kind, Some("not-a-date"), Some("2024-13-45"), today),
                resolve(kind, None, None, today)
            );
            assert_eq!(
                resolve(kind, Some(""), Some("2024-01-10"), today),
                resolve(kind, None, Some("2024-01-10"), today)
            );
        }
    }

    #[test]
    fn window_is_always_ordered() {
        let today = d(TODAY);
        let samples = [
            None,
            Some("2024-01-01"),
            Some("2024-03-15"),
            Some("2024-12-31"),
            Some("1999-02-28"),
            Some("junk"),
        ];
        for kind in ReportKind::ALL {
            for s in samples {
                for e in samples {
                    let w = resolve(kind, s, e, today);
                    assert!(w.start_date <= w.end_date, "{kind} {s:?} {e:?}");
                }
            }
        }
    }

    #[test]
    fn per_report_helpers_anchor_on_local_date() {
        let today = today();
        assert_eq!(
            action_summary(None, None),
            resolve(ReportKind::ActionSummary, None, None, today)
        );
        assert_eq!(
            income_statements(None, Some("2024-02-10")),
            window("2024-02-01", "2024-02-10")
        );
        assert_eq!(
            job_performance(Some("2024-01-10"), None),
            window("2024-01-10", "2024-01-17")
        );
        assert_eq!(
            sales_summary(Some("2024-02-10"), Some("2024-02-01")),
            window("2024-02-01", "2024-02-10")
        );
    }

    #[test]
    fn report_kind_parses_both_spellings() {
        assert_eq!(
            "job_performance".parse::<ReportKind>().unwrap(),
            ReportKind::JobPerformance
        );
        assert_eq!(
            "Sales-Summary".parse::<ReportKind>().unwrap(),
            ReportKind::SalesSummary
        );
        assert!("inventory".parse::<ReportKind>().is_err());
        assert_eq!(ReportKind::IncomeStatements.page_key(), "income_statements");
    }

    #[test]
    fn label_and_contains() {
        let w = DateWindow::new(d("2024-03-31"), d("2024-03-01"));
        assert_eq!(w.label(), "2024-03-01 to 2024-03-31");
        assert!(w.contains(d("2024-03-15")));
        assert!(!w.contains(d("2024-04-01")));
    }
}
