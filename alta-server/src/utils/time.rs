//! Business time zone helpers
//!
//! Stored timestamps are UTC; calendar days and months are always cut in
//! the configured business time zone.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use chrono_tz::Tz;

use super::{AppError, AppResult};

/// Parse a date string (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// Calendar date of an instant in the business time zone
pub fn local_date(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// Today in the business time zone
pub fn today(tz: Tz) -> NaiveDate {
    local_date(Utc::now(), tz)
}

/// `(year, month)` of an instant in the business time zone
pub fn local_month(instant: DateTime<Utc>, tz: Tz) -> (i32, u32) {
    let date = local_date(instant, tz);
    (date.year(), date.month())
}

/// The month `back` months before `(year, month)`
pub fn months_back(year: i32, month: u32, back: u32) -> (i32, u32) {
    let index = year * 12 + month as i32 - 1 - back as i32;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}
