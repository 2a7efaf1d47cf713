//! Lenient timestamp parsing: anything unrecognised becomes `None`.

use chrono::{NaiveDate, NaiveDateTime};

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Parse a timestamp cell. Bare dates resolve to midnight.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(ts);
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn parses_space_and_t_separated() {
        assert_eq!(
            parse_timestamp("2017-10-02 10:56:33"),
            Some(dt(2017, 10, 2, 10, 56, 33))
        );
        assert_eq!(
            parse_timestamp("2017-10-02T10:56:33"),
            Some(dt(2017, 10, 2, 10, 56, 33))
        );
    }

    #[test]
    fn parses_fractional_seconds() {
        let ts = parse_timestamp("2017-10-02 10:56:33.250").unwrap();
        assert_eq!(ts.date(), NaiveDate::from_ymd_opt(2017, 10, 2).unwrap());
        assert_eq!(ts.and_utc().timestamp_subsec_millis(), 250);
    }

    #[test]
    fn bare_date_is_midnight() {
        assert_eq!(parse_timestamp("2018-01-15"), Some(dt(2018, 1, 15, 0, 0, 0)));
    }

    #[test]
    fn garbage_becomes_none() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("   "), None);
        assert_eq!(parse_timestamp("not a date"), None);
        assert_eq!(parse_timestamp("2018-13-40 10:00:00"), None);
        assert_eq!(parse_timestamp("NaT"), None);
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(
            parse_timestamp("  2018-01-15 08:00:00 "),
            Some(dt(2018, 1, 15, 8, 0, 0))
        );
    }
}
