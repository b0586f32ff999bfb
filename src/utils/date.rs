use chrono::{Datelike, Days, Months, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Parse a `YYYY-MM-DD` request value.
/// Missing, blank or malformed input all yield `None`.
pub fn parse_date(s: Option<&str>) -> Option<NaiveDate> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

pub fn first_of_month(d: NaiveDate) -> NaiveDate {
    d.with_day(1).unwrap_or(d)
}

pub fn last_of_month(d: NaiveDate) -> NaiveDate {
    month_last_day(d.year(), d.month())
        .and_then(|last| d.with_day(last))
        .unwrap_or(d)
}

/// Day number of the last day of month `m`, `None` for an invalid month.
pub fn month_last_day(y: i32, m: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(y, m, 1)?;
    first
        .checked_add_months(Months::new(1))?
        .checked_sub_days(Days::new(1))
        .map(|last| last.day())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_swallows_bad_input() {
        assert_eq!(
            parse_date(Some(" 2024-02-29 ")),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
        assert_eq!(parse_date(Some("2023-02-29")), None);
        assert_eq!(parse_date(Some("15/03/2024")), None);
        assert_eq!(parse_date(Some("   ")), None);
        assert_eq!(parse_date(None), None);
    }

    #[test]
    fn month_bounds() {
        let d = NaiveDate::from_ymd_opt(2100, 2, 14).unwrap();
        assert_eq!(first_of_month(d), NaiveDate::from_ymd_opt(2100, 2, 1).unwrap());
        assert_eq!(last_of_month(d), NaiveDate::from_ymd_opt(2100, 2, 28).unwrap());

        let d = NaiveDate::from_ymd_opt(2000, 2, 3).unwrap();
        assert_eq!(last_of_month(d), NaiveDate::from_ymd_opt(2000, 2, 29).unwrap());

        let d = NaiveDate::from_ymd_opt(2024, 12, 9).unwrap();
        assert_eq!(last_of_month(d), NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
    }

    #[test]
    fn month_last_day_per_month() {
        assert_eq!(month_last_day(2024, 2), Some(29));
        assert_eq!(month_last_day(2023, 2), Some(28));
        assert_eq!(month_last_day(2023, 4), Some(30));
        assert_eq!(month_last_day(2023, 12), Some(31));
        assert_eq!(month_last_day(2023, 0), None);
        assert_eq!(month_last_day(2023, 13), None);
    }
}
