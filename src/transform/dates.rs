//! Date filtering: `filter_future_dates`.

use chrono::{NaiveDate, NaiveDateTime};

use crate::types::{Record, Records};

/// Field holding the record date.
pub const TIMESTAMP_FIELD: &str = "timestamp";

/// Expected `timestamp` format.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Drop records dated after `now`.
///
/// A `timestamp` that parses as [`DATE_FORMAT`] is read as midnight of that day; the record is
/// kept if that moment is on or before `now`. Records whose `timestamp` is missing, not text, or
/// not a valid date are kept. Text with leading whitespace or a sign is not a valid date.
pub fn filter_future_dates(records: Records, now: NaiveDateTime) -> Records {
    records
        .into_iter()
        .filter(|record| match record_date(record) {
            Some(date) => date <= now,
            None => true,
        })
        .collect()
}

fn record_date(record: &Record) -> Option<NaiveDateTime> {
    let raw = record.get(TIMESTAMP_FIELD)?.as_str()?;
    // chrono skips leading whitespace and accepts a sign on `%Y`; neither is a plain date.
    let bytes = raw.as_bytes();
    if !(bytes.first().is_some_and(u8::is_ascii_digit) && bytes.last().is_some_and(u8::is_ascii_digit)) {
        return None;
    }
    let date = NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()?;
    date.and_hms_opt(0, 0, 0)
}
