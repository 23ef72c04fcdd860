use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::{CatalogError, Result};

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d %B %Y", "%B %d, %Y"];

/// Parse the date shapes that show up in `release` / `date_added`:
/// ISO timestamps (with or without offset), plain dates, "October 2024"
/// (what the bot writes for fresh entries) and bare years.
pub fn parse_date(raw: &str) -> Result<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(CatalogError::InvalidDate(raw.to_string()));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_utc());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }
    // "Month YYYY" carries no day; check it before the day-bearing formats
    // so "October 2024" never reads as day 20 of year 24
    if let Ok(d) = NaiveDate::parse_from_str(&format!("1 {}", s), "%d %B %Y") {
        return Ok(midnight(d));
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(midnight(d));
        }
    }
    if s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit()) {
        if let Some(d) = s.parse().ok().and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1)) {
            return Ok(midnight(d));
        }
    }
    Err(CatalogError::InvalidDate(raw.to_string()))
}

/// Sort key: unparseable dates become `None`, which orders before every real date.
pub fn sort_key(raw: &str) -> Option<NaiveDateTime> {
    match parse_date(raw) {
        Ok(dt) => Some(dt),
        Err(e) => {
            tracing::debug!("{}; sorting as oldest", e);
            None
        }
    }
}

fn midnight(d: NaiveDate) -> NaiveDateTime {
    d.and_time(chrono::NaiveTime::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDateTime {
        midnight(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn parses_catalog_shapes() {
        assert_eq!(parse_date("2024-01-01").unwrap(), ymd(2024, 1, 1));
        assert_eq!(parse_date("October 2024").unwrap(), ymd(2024, 10, 1));
        assert_eq!(parse_date("Oct 2024").unwrap(), ymd(2024, 10, 1));
        assert_eq!(parse_date("5 October 2024").unwrap(), ymd(2024, 10, 5));
        assert_eq!(parse_date("March 5, 2023").unwrap(), ymd(2023, 3, 5));
        assert_eq!(parse_date("2021").unwrap(), ymd(2021, 1, 1));
        assert!(parse_date("2024-05-01T10:20:30.123456").unwrap() > ymd(2024, 5, 1));
        assert_eq!(
            parse_date("2024-05-01T02:00:00+02:00").unwrap(),
            ymd(2024, 5, 1)
        );
    }

    #[test]
    fn garbage_is_invalid_and_sorts_oldest() {
        assert_eq!(parse_date("soon"), Err(CatalogError::InvalidDate("soon".into())));
        assert!(parse_date("").is_err());
        assert!(sort_key("not a date") < sort_key("1900-01-01"));
    }
}
