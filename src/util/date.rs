use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

/// Formats that carry an explicit numeric offset.
const OFFSET_FORMATS: &[&str] = &[
    "%d %b %Y %H:%M:%S %z",
    "%d %b %Y %H:%M %z",
    "%d %B %Y %H:%M:%S %z",
    "%Y-%m-%dT%H:%M:%S%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S %z",
    "%Y-%m-%d %H:%M:%S%z",
];

/// Formats without an offset; these are read as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%d %b %Y %H:%M:%S",
];

/// Parses a feed date permissively.
///
/// Tries RFC 2822 (RSS `pubDate`) and RFC 3339 (Atom, W3CDTF) first, then a
/// set of looser layouts seen in the wild: a wrong or missing weekday, `UTC`
/// or `Z` zone names, missing offsets (assumed UTC) and bare dates
/// (midnight UTC).
///
/// Returns `None` when nothing matches.
pub fn parse_date(raw: &str) -> Option<DateTime<FixedOffset>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }

    // Weekdays are frequently wrong or abbreviated oddly; they carry no
    // information once the day of month is known.
    let without_weekday = match s.split_once(',') {
        Some((day, rest)) if day.chars().all(char::is_alphabetic) => rest.trim(),
        _ => s,
    };
    let normalized = normalize_zone(without_weekday);

    if let Ok(dt) = DateTime::parse_from_rfc2822(&normalized) {
        return Some(dt);
    }
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&normalized, format) {
            return Some(dt);
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&normalized, format) {
            return Some(naive.and_utc().fixed_offset());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(&normalized, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|naive| naive.and_utc().fixed_offset());
    }

    None
}

/// Parses a feed date and re-emits it as ISO-8601 (`2024-01-01T00:00:00+00:00`).
pub fn normalize_date(raw: &str) -> Option<String> {
    parse_date(raw).map(|dt| dt.to_rfc3339())
}

/// Rewrites zone names chrono does not accept into numeric offsets.
fn normalize_zone(s: &str) -> String {
    for suffix in [" UTC", " Z", "UTC", "Z"] {
        if let Some(head) = s.strip_suffix(suffix) {
            // "Z" also ends RFC 3339 strings; keep the `T` form parseable.
            let separator = if suffix.starts_with(' ') { " " } else { "" };
            return format!("{}{}+0000", head.trim_end(), separator);
        }
    }
    s.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rfc822_gmt() {
        assert_eq!(
            normalize_date("Mon, 01 Jan 2024 00:00:00 GMT").as_deref(),
            Some("2024-01-01T00:00:00+00:00")
        );
    }

    #[test]
    fn test_rfc822_offset_preserved() {
        assert_eq!(
            normalize_date("Tue, 10 Jun 2003 04:00:00 -0500").as_deref(),
            Some("2003-06-10T04:00:00-05:00")
        );
    }

    #[test]
    fn test_wrong_weekday_tolerated() {
        // 1 Jan 2024 was a Monday.
        assert_eq!(
            normalize_date("Fri, 01 Jan 2024 12:30:00 +0000").as_deref(),
            Some("2024-01-01T12:30:00+00:00")
        );
    }

    #[test]
    fn test_utc_zone_name() {
        assert_eq!(
            normalize_date("Mon, 01 Jan 2024 08:00:00 UTC").as_deref(),
            Some("2024-01-01T08:00:00+00:00")
        );
    }

    #[test]
    fn test_rfc3339() {
        assert_eq!(
            normalize_date("2005-07-31T12:29:29Z").as_deref(),
            Some("2005-07-31T12:29:29+00:00")
        );
        assert_eq!(
            normalize_date("2003-12-13T18:30:02+01:00").as_deref(),
            Some("2003-12-13T18:30:02+01:00")
        );
    }

    #[test]
    fn test_dublin_core_date_only() {
        assert_eq!(
            normalize_date("2002-09-05").as_deref(),
            Some("2002-09-05T00:00:00+00:00")
        );
    }

    #[test]
    fn test_naive_datetime_is_utc() {
        assert_eq!(
            normalize_date("2010-03-04 05:06:07").as_deref(),
            Some("2010-03-04T05:06:07+00:00")
        );
    }

    #[test]
    fn test_garbage_is_none() {
        assert!(parse_date("yesterday-ish").is_none());
        assert!(parse_date("   ").is_none());
    }
}
