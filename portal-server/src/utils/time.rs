//! Time helpers
//!
//! All date-to-timestamp conversion happens at the API handler layer;
//! the repository layer only sees `i64` unix millis.

use chrono::{DateTime, NaiveDate, Utc};

use super::{AppError, AppResult};

/// Date/time format used by report exports
pub const EXPORT_DATETIME_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Current time as unix millis
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Parse a date string (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// Start of the calendar day (00:00:00 UTC) as unix millis
pub fn day_start_millis(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc().timestamp_millis())
        .unwrap_or(0)
}

/// End of the calendar day, exclusive: next day 00:00:00 UTC as unix millis
pub fn day_end_millis(date: NaiveDate) -> i64 {
    let next_day = date.succ_opt().unwrap_or(date);
    day_start_millis(next_day)
}

/// Format unix millis as `dd/MM/yyyy HH:mm` for export columns
pub fn format_export_datetime(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|dt| dt.format(EXPORT_DATETIME_FORMAT).to_string())
        .unwrap_or_else(|| "Fecha inválida".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_bounds_cover_exactly_one_day() {
        let date = parse_date("2024-03-15").unwrap();
        let start = day_start_millis(date);
        let end = day_end_millis(date);
        assert_eq!(end - start, 24 * 60 * 60 * 1000);
    }

    #[test]
    fn export_format_is_dd_mm_yyyy() {
        // 2024-03-15 09:05 UTC
        let millis = 1_710_493_500_000;
        assert_eq!(format_export_datetime(millis), "15/03/2024 09:05");
    }

    #[test]
    fn rejects_bad_date() {
        assert!(parse_date("15-03-2024").is_err());
    }
}
