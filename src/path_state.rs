use crate::clock::Clock;
use crate::models::{DateRange, ProgressData};
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

pub const DEFAULT_TITLE: &str = "Progress";

/// Characters left alone by `encodeURIComponent`; everything else is escaped.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const NAIVE_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parses an ISO date (`2024-01-31`) or date-time. Date-only values and
/// date-times without an offset are read as UTC.
pub fn parse_date(input: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }

    let with_offset = match input.strip_suffix('Z') {
        Some(local) => format!("{local}+00:00"),
        None => input.to_string(),
    };
    if let Ok(dt) = DateTime::parse_from_str(&with_offset, "%Y-%m-%dT%H:%M%:z") {
        return Some(dt.with_timezone(&Utc));
    }

    NAIVE_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .map(|dt| dt.and_utc())
}

/// Removes the configured base path. `"/"` means the app is served at the root.
pub fn strip_base_path<'a>(path: &'a str, base_path: &str) -> &'a str {
    if base_path == "/" || base_path.is_empty() {
        return path;
    }

    match path.strip_prefix(base_path) {
        Some("") => "/",
        Some(rest) => rest,
        None => path,
    }
}

pub fn path_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|part| !part.is_empty()).collect()
}

pub fn parse_date_range_from_path(path: &str) -> Option<DateRange> {
    let parts = path_segments(path);
    if parts.len() < 2 {
        return None;
    }

    let first = parse_date(parts[0])?;
    let second = parse_date(parts[1])?;

    Some(DateRange {
        start: first.min(second),
        end: first.max(second),
    })
}

pub fn parse_title_from_path(path: &str) -> String {
    let parts = path_segments(path);
    if parts.len() < 3 {
        return DEFAULT_TITLE.to_string();
    }

    decode_component(&parts[2..].join("/"))
}

/// Invalid escapes are kept literally and invalid UTF-8 is replaced.
pub fn decode_component(value: &str) -> String {
    percent_decode_str(value).decode_utf8_lossy().into_owned()
}

pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Percentage of `[start, end]` elapsed at `current`, or `None` outside the range.
///
/// A zero-length range reports 100 when `current` sits exactly on it.
pub fn calculate_progress(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    current: DateTime<Utc>,
) -> Option<f64> {
    if current < start || current > end {
        return None;
    }

    let total = (end - start).num_milliseconds();
    if total == 0 {
        return Some(100.0);
    }

    let elapsed = (current - start).num_milliseconds();
    let percentage = elapsed as f64 / total as f64 * 100.0;
    Some(percentage.clamp(0.0, 100.0))
}

/// Jan 1 00:00:00.000 through Dec 31 23:59:59.999 (UTC) of the year containing `now`.
pub fn year_range(now: DateTime<Utc>) -> DateRange {
    let year = now.year();
    let start = Utc
        .with_ymd_and_hms(year, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or(now);
    let end = Utc
        .with_ymd_and_hms(year + 1, 1, 1, 0, 0, 0)
        .single()
        .map(|next_year| next_year - Duration::milliseconds(1))
        .unwrap_or(now);

    DateRange { start, end }
}

/// Never fails: a path without a usable date range falls back to the current year.
pub fn progress_bar_data<C: Clock + ?Sized>(path: &str, clock: &C) -> ProgressData {
    let current = clock.now();

    let (range, title) = match parse_date_range_from_path(path) {
        Some(range) => (range, parse_title_from_path(path)),
        None => (year_range(current), current.year().to_string()),
    };

    ProgressData {
        percentage: calculate_progress(range.start, range.end, current),
        start: range.start,
        end: range.end,
        current,
        title,
    }
}

/// `YYYY-MM-DD`, the form dates take in generated paths and date inputs.
pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn build_path(prefix: &str, start: DateTime<Utc>, end: DateTime<Utc>, title: &str) -> String {
    format!(
        "{prefix}/{}/{}/{}",
        format_date(start),
        format_date(end),
        encode_component(title)
    )
}

pub fn year_path(prefix: &str, now: DateTime<Utc>) -> String {
    let year = now.year();
    format!("{prefix}/{year}-01-01/{year}-12-31/{year}")
}

#[derive(Debug, Default)]
pub struct Edit<'a> {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub title: Option<&'a str>,
}

/// Applies a date/title edit and returns the new path.
///
/// Moving the start past the end drags the end along, and the reverse for the end.
/// A blank title keeps the existing one.
pub fn apply_edit(prefix: &str, data: &ProgressData, edit: &Edit<'_>) -> String {
    let mut start = data.start;
    let mut end = data.end;

    if let Some(new_start) = edit.start {
        start = new_start;
        if new_start > end {
            end = new_start;
        }
    }

    if let Some(new_end) = edit.end {
        end = new_end;
        if new_end < start {
            start = new_end;
        }
    }

    let title = match edit.title.map(str::trim) {
        Some(title) if !title.is_empty() => title,
        _ => data.title.as_str(),
    };

    build_path(prefix, start, end, title)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;

    fn at(value: &str) -> DateTime<Utc> {
        parse_date(value).expect("valid test date")
    }

    #[test]
    fn parse_date_accepts_iso_forms() {
        assert_eq!(at("2024-03-05").to_rfc3339(), "2024-03-05T00:00:00+00:00");
        assert_eq!(
            at("2024-03-05T10:30:00+02:00").to_rfc3339(),
            "2024-03-05T08:30:00+00:00"
        );
        assert_eq!(at("2024-03-05T10:30").to_rfc3339(), "2024-03-05T10:30:00+00:00");
        assert_eq!(at("2024-03-05T10:30Z").to_rfc3339(), "2024-03-05T10:30:00+00:00");
        assert_eq!(
            at("2024-03-05T10:30+02:00").to_rfc3339(),
            "2024-03-05T08:30:00+00:00"
        );
        assert_eq!(
            at("2024-03-05T10:30:15.250").timestamp_millis() % 1000,
            250
        );
    }

    #[test]
    fn parse_date_rejects_garbage() {
        assert!(parse_date("invalid").is_none());
        assert!(parse_date("2024-13-01").is_none());
        assert!(parse_date("2024-02-30").is_none());
        assert!(parse_date("").is_none());
    }

    #[test]
    fn date_range_is_sorted() {
        let forward = parse_date_range_from_path("/2024-01-01/2024-12-31").unwrap();
        let reversed = parse_date_range_from_path("/2024-12-31/2024-01-01").unwrap();
        assert_eq!(forward, reversed);
        assert_eq!(forward.start, at("2024-01-01"));
        assert_eq!(forward.end, at("2024-12-31"));
    }

    #[test]
    fn date_range_ignores_empty_segments() {
        let range = parse_date_range_from_path("//2024-01-01///2024-02-01/").unwrap();
        assert_eq!(range.start, at("2024-01-01"));
        assert_eq!(range.end, at("2024-02-01"));
    }

    #[test]
    fn date_range_accepts_minute_precision_with_offset() {
        let range = parse_date_range_from_path("/2024-03-05T10:30Z/2024-04-01").unwrap();
        assert_eq!(range.start, at("2024-03-05T10:30:00Z"));
        assert_eq!(range.end, at("2024-04-01"));
    }

    #[test]
    fn date_range_requires_two_valid_dates() {
        assert!(parse_date_range_from_path("/").is_none());
        assert!(parse_date_range_from_path("/2024-01-01").is_none());
        assert!(parse_date_range_from_path("/2024-01-01/nope").is_none());
        assert!(parse_date_range_from_path("/invalid/invalid").is_none());
    }

    #[test]
    fn title_defaults_and_decodes() {
        assert_eq!(parse_title_from_path("/2024-01-01/2024-12-31"), "Progress");
        assert_eq!(
            parse_title_from_path("/2024-01-01/2024-12-31/Pete's%20Career%20break"),
            "Pete's Career break"
        );
        assert_eq!(parse_title_from_path("/a/b/one/two"), "one/two");
    }

    #[test]
    fn title_survives_encoding() {
        let title = "Q3 / Q4 \"launch\" & more";
        let path = format!("/2024-01-01/2024-12-31/{}", encode_component(title));
        assert_eq!(parse_title_from_path(&path), title);
    }

    #[test]
    fn title_with_bad_escape_is_kept() {
        assert_eq!(parse_title_from_path("/a/b/100%"), "100%");
    }

    #[test]
    fn strip_base_path_handles_prefix() {
        assert_eq!(strip_base_path("/a/b", "/"), "/a/b");
        assert_eq!(strip_base_path("/app/a/b", "/app"), "/a/b");
        assert_eq!(strip_base_path("/app", "/app"), "/");
        assert_eq!(strip_base_path("/other/a", "/app"), "/other/a");
    }

    #[test]
    fn progress_endpoints() {
        let start = at("2024-01-01");
        let end = at("2024-12-31");
        assert_eq!(calculate_progress(start, end, start), Some(0.0));
        assert_eq!(calculate_progress(start, end, end), Some(100.0));
        assert_eq!(calculate_progress(start, end, at("2023-12-31")), None);
        assert_eq!(calculate_progress(start, end, at("2025-01-01")), None);
    }

    #[test]
    fn progress_midpoint() {
        let value = calculate_progress(at("2024-01-01"), at("2024-01-03"), at("2024-01-02")).unwrap();
        assert!((value - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_length_range_is_complete() {
        let day = at("2024-05-05");
        assert_eq!(calculate_progress(day, day, day), Some(100.0));
        assert_eq!(calculate_progress(day, day, at("2024-05-06")), None);
    }

    #[test]
    fn data_for_valid_path() {
        let clock = FixedClock(at("2024-06-30"));
        let data = progress_bar_data("/2024-01-01/2024-12-31", &clock);
        let percentage = data.percentage.unwrap();
        assert!(percentage > 0.0 && percentage < 100.0);
        assert_eq!(data.title, "Progress");
        assert_eq!(data.current, clock.0);
    }

    #[test]
    fn data_is_order_independent() {
        let clock = FixedClock(at("2024-06-30"));
        assert_eq!(
            progress_bar_data("/2024-01-01/2024-12-31", &clock),
            progress_bar_data("/2024-12-31/2024-01-01", &clock)
        );
    }

    #[test]
    fn data_is_stable_under_fixed_clock() {
        let clock = FixedClock(at("2024-02-10T08:00:00Z"));
        let path = "/2024-01-01/2024-03-01/Sprint";
        assert_eq!(progress_bar_data(path, &clock), progress_bar_data(path, &clock));
    }

    #[test]
    fn invalid_path_falls_back_to_year() {
        let clock = FixedClock(at("2024-06-15"));
        let data = progress_bar_data("/invalid/invalid", &clock);
        assert_eq!(data.start, at("2024-01-01"));
        assert_eq!(data.end.to_rfc3339(), "2024-12-31T23:59:59.999+00:00");
        assert_eq!(data.title, "2024");
        assert!(data.percentage.is_some());
    }

    #[test]
    fn out_of_range_has_no_percentage() {
        let before = FixedClock(at("2024-12-31"));
        assert!(progress_bar_data("/2025-01-01/2025-12-31", &before).percentage.is_none());

        let after = FixedClock(at("2025-01-01"));
        assert!(progress_bar_data("/2024-01-01/2024-12-31", &after).percentage.is_none());
    }

    #[test]
    fn year_path_is_a_valid_range() {
        let path = year_path("/app", at("2026-10-19"));
        assert_eq!(path, "/app/2026-01-01/2026-12-31/2026");
        assert!(parse_date_range_from_path(strip_base_path(&path, "/app")).is_some());
    }

    #[test]
    fn build_path_encodes_title() {
        let path = build_path("", at("2024-01-01"), at("2024-02-01"), "A/B & C");
        assert_eq!(path, "/2024-01-01/2024-02-01/A%2FB%20%26%20C");
    }

    #[test]
    fn edit_start_past_end_drags_end() {
        let clock = FixedClock(at("2024-06-01"));
        let data = progress_bar_data("/2024-01-01/2024-03-01/Plan", &clock);
        let edit = Edit {
            start: Some(at("2024-04-01")),
            ..Edit::default()
        };
        assert_eq!(apply_edit("", &data, &edit), "/2024-04-01/2024-04-01/Plan");
    }

    #[test]
    fn edit_end_before_start_drags_start() {
        let clock = FixedClock(at("2024-06-01"));
        let data = progress_bar_data("/2024-02-01/2024-03-01/Plan", &clock);
        let edit = Edit {
            end: Some(at("2024-01-15")),
            ..Edit::default()
        };
        assert_eq!(apply_edit("/app", &data, &edit), "/app/2024-01-15/2024-01-15/Plan");
    }

    #[test]
    fn edit_blank_title_keeps_old_one() {
        let clock = FixedClock(at("2024-06-01"));
        let data = progress_bar_data("/2024-02-01/2024-03-01/Plan", &clock);
        let blank = Edit {
            title: Some("   "),
            ..Edit::default()
        };
        assert_eq!(apply_edit("", &data, &blank), "/2024-02-01/2024-03-01/Plan");

        let renamed = Edit {
            title: Some("  New plan "),
            ..Edit::default()
        };
        assert_eq!(apply_edit("", &data, &renamed), "/2024-02-01/2024-03-01/New%20plan");
    }
}
