// src/export/excel_date.rs

use chrono::NaiveDate;

pub(crate) const DATE_FORMAT: &str = "yyyy-mm-dd";

/// Excel serial number of a calendar date (1900 date system).
pub(crate) fn naive_date_to_excel_serial(d: NaiveDate) -> f64 {
    // Day 0 is 1899-12-30 so that the fictitious 1900-02-29 lines up.
    let excel_epoch = NaiveDate::from_ymd_opt(1899, 12, 30).unwrap_or(NaiveDate::MIN);
    (d - excel_epoch).num_days() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_serials() {
        let d = |y, m, dd| NaiveDate::from_ymd_opt(y, m, dd).unwrap();
        assert_eq!(naive_date_to_excel_serial(d(1900, 3, 1)), 61.0);
        assert_eq!(naive_date_to_excel_serial(d(2024, 3, 15)), 45366.0);
    }
}
