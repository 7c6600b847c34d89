/*!
 Contains date conversion functions for Apple's reference date.

 Foundation stores absolute time as seconds relative to `2001-01-01T00:00:00Z` instead of the Unix epoch.
*/

use chrono::{DateTime, Utc};

/// Seconds between the Unix epoch and the Apple reference date
pub const APPLE_EPOCH_OFFSET: i64 = 978_307_200;

const MICROS_PER_SECOND: f64 = 1_000_000.0;

/// Convert seconds since the Apple reference date into a UTC timestamp, keeping microsecond precision
///
/// Returns `None` for values that are not finite or do not fit in a [`DateTime`].
pub fn from_reference_seconds(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }

    // Split before applying the offset so the fraction does not lose precision
    let whole = seconds.floor();
    let mut micros = ((seconds - whole) * MICROS_PER_SECOND).round() as u32;
    let mut unix_seconds = (whole as i64).checked_add(APPLE_EPOCH_OFFSET)?;
    if micros >= MICROS_PER_SECOND as u32 {
        unix_seconds = unix_seconds.checked_add(1)?;
        micros = 0;
    }

    DateTime::from_timestamp(unix_seconds, micros * 1_000)
}

#[cfg(test)]
mod tests {
    use chrono::SecondsFormat;

    use crate::util::dates::from_reference_seconds;

    fn format(seconds: f64) -> String {
        from_reference_seconds(seconds)
            .unwrap()
            .to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    #[test]
    fn can_convert_reference_date() {
        assert_eq!(format(0.0), "2001-01-01T00:00:00.000000Z");
    }

    #[test]
    fn can_convert_before_unix_epoch() {
        assert_eq!(format(-978307300.0), "1969-12-31T23:58:20.000000Z");
    }

    #[test]
    fn can_convert_negative_fraction() {
        assert_eq!(format(-978307300.123456), "1969-12-31T23:58:19.876544Z");
    }

    #[test]
    fn can_convert_microseconds() {
        assert_eq!(format(63216306.000111), "2003-01-02T16:05:06.000111Z");
        assert_eq!(format(63216306.123), "2003-01-02T16:05:06.123000Z");
        assert_eq!(format(0.789012), "2001-01-01T00:00:00.789012Z");
    }

    #[test]
    fn can_round_up_to_next_second() {
        assert_eq!(format(0.9999999), "2001-01-01T00:00:01.000000Z");
    }

    #[test]
    fn cant_convert_non_finite() {
        assert!(from_reference_seconds(f64::NAN).is_none());
        assert!(from_reference_seconds(f64::INFINITY).is_none());
    }
}
