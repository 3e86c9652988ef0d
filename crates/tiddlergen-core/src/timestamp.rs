use chrono::{DateTime, Datelike, TimeDelta, TimeZone, Utc};

use crate::error::{Error, Result};

/// Length of a TiddlyWiki timestamp string.
pub const TIMESTAMP_LEN: usize = 17;

/// Format a point in time as a TiddlyWiki timestamp.
///
/// The value is normalized to UTC and rendered as `YYYYMMDDhhmmss` followed
/// by three millisecond digits. Sub-millisecond precision is truncated.
pub fn format_tw5_timestamp<Tz: TimeZone>(dt: &DateTime<Tz>) -> String {
    let utc = dt.with_timezone(&Utc);
    // leap seconds report 1000..=1999
    let millis = utc.timestamp_subsec_millis().min(999);
    format!("{}{:03}", utc.format("%Y%m%d%H%M%S"), millis)
}

/// Years a TiddlyWiki timestamp can hold in four digits.
const MIN_YEAR: i32 = 0;
const MAX_YEAR: i32 = 9999;

/// `base + steps * increment_seconds`, failing instead of overflowing or
/// leaving the four-digit year range.
pub fn offset_timestamp(
    base: DateTime<Utc>,
    steps: i64,
    increment_seconds: i64,
) -> Result<DateTime<Utc>> {
    let out_of_range = || {
        Error::TimestampOutOfRange(format!(
            "{steps} steps of {increment_seconds}s from {}",
            base.to_rfc3339()
        ))
    };
    let seconds = steps.checked_mul(increment_seconds).ok_or_else(out_of_range)?;
    let delta = TimeDelta::try_seconds(seconds).ok_or_else(out_of_range)?;
    let shifted = base.checked_add_signed(delta).ok_or_else(out_of_range)?;
    if !(MIN_YEAR..=MAX_YEAR).contains(&shifted.year()) {
        return Err(out_of_range());
    }
    Ok(shifted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveDate};

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32, micros: u32) -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(y, mo, d)
            .and_then(|date| date.and_hms_micro_opt(h, mi, s, micros))
            .expect("valid datetime")
            .and_utc()
    }

    #[test]
    fn formats_fixed_width_utc() {
        let dt = utc(2024, 3, 7, 9, 5, 2, 45_999);
        assert_eq!(format_tw5_timestamp(&dt), "20240307090502045");
    }

    #[test]
    fn truncates_milliseconds() {
        let dt = utc(2024, 12, 31, 23, 59, 59, 999_999);
        assert_eq!(format_tw5_timestamp(&dt), "20241231235959999");
    }

    #[test]
    fn normalizes_offsets_to_utc() {
        let offset = FixedOffset::east_opt(2 * 3600).expect("offset");
        let local = offset
            .with_ymd_and_hms(2024, 1, 1, 1, 30, 0)
            .single()
            .expect("local datetime");
        assert_eq!(format_tw5_timestamp(&local), "20231231233000000");
    }

    #[test]
    fn offset_applies_increment() {
        let base = utc(2024, 1, 1, 0, 0, 0, 0);
        let shifted = offset_timestamp(base, 3, 90).expect("in range");
        assert_eq!(format_tw5_timestamp(&shifted), "20240101000430000");
        let back = offset_timestamp(base, 2, -60).expect("in range");
        assert_eq!(format_tw5_timestamp(&back), "20231231235800000");
    }

    #[test]
    fn offset_overflow_is_an_error() {
        let base = utc(2024, 1, 1, 0, 0, 0, 0);
        assert!(offset_timestamp(base, i64::MAX, 2).is_err());
        assert!(offset_timestamp(base, 1, i64::MAX / 1000).is_err());
    }

    #[test]
    fn offset_past_year_9999_is_an_error() {
        let base = utc(2024, 1, 1, 0, 0, 0, 0);
        let step = 400 * 366 * 86_400 * 25;
        assert!(offset_timestamp(base, 1, step).is_err());
        assert!(offset_timestamp(base, -1, step).is_err());

        let last = utc(9999, 12, 31, 23, 59, 59, 0);
        let kept = offset_timestamp(last, 0, 1).expect("in range");
        assert_eq!(format_tw5_timestamp(&kept).len(), TIMESTAMP_LEN);
        assert!(offset_timestamp(last, 1, 1).is_err());
    }
}
