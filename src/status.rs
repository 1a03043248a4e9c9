use crate::models::ProgressData;
use crate::render::{format_date_long, to_fixed};
use chrono::{DateTime, Utc};

const MS_PER_DAY: f64 = 86_400_000.0;

/// Whole days between two instants, rounded to the nearest day.
pub fn days_between(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    let millis = (end - start).num_milliseconds() as f64;
    (millis / MS_PER_DAY).round() as i64
}

fn plural(count: i64) -> &'static str {
    if count == 1 { "" } else { "s" }
}

pub fn status_text(data: &ProgressData) -> String {
    match data.percentage {
        Some(percentage) => {
            let total_days = days_between(data.start, data.end);
            let elapsed_days = days_between(data.start, data.current);
            let remaining_days = total_days - elapsed_days;
            format!(
                "{}% complete • {elapsed_days} days elapsed • {remaining_days} days remaining",
                to_fixed(percentage, 1)
            )
        }
        None if data.current < data.start => {
            let days = days_between(data.current, data.start);
            format!("Starting in {days} day{}", plural(days))
        }
        None => {
            let days = days_between(data.end, data.current);
            format!("Completed {days} day{} ago", plural(days))
        }
    }
}

/// Text handed to the share sheet alongside the page URL.
pub fn share_text(data: &ProgressData) -> String {
    let start = format_date_long(data.start);
    let end = format_date_long(data.end);

    match data.percentage {
        Some(percentage) => format!(
            "{}: {}% complete ({start} to {end})",
            data.title,
            to_fixed(percentage, 2)
        ),
        None if data.current < data.start => {
            format!("{}: Starting {start}, ending {end}", data.title)
        }
        None => format!("{}: Completed {end} (started {start})", data.title),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::path_state::{parse_date, progress_bar_data};

    fn data_at(path: &str, now: &str) -> ProgressData {
        progress_bar_data(path, &FixedClock(parse_date(now).unwrap()))
    }

    #[test]
    fn in_range_status_adds_up() {
        let data = data_at("/2024-01-01/2024-01-11", "2024-01-05");
        assert_eq!(
            status_text(&data),
            "40.0% complete • 4 days elapsed • 6 days remaining"
        );
    }

    #[test]
    fn in_range_status_rounds_ties_up() {
        let data = data_at("/2024-01-01/2025-02-04", "2024-01-02");
        assert_eq!(data.percentage, Some(0.25));
        assert_eq!(
            status_text(&data),
            "0.3% complete • 1 days elapsed • 399 days remaining"
        );
    }

    #[test]
    fn starting_in_one_day() {
        let data = data_at("/2025-01-01/2025-12-31", "2024-12-31");
        assert!(status_text(&data).starts_with("Starting in 1 day"));
        assert_eq!(status_text(&data), "Starting in 1 day");
    }

    #[test]
    fn starting_in_several_days() {
        let data = data_at("/2025-01-01/2025-12-31", "2024-12-29");
        assert_eq!(status_text(&data), "Starting in 3 days");
    }

    #[test]
    fn completed_one_day_ago() {
        let data = data_at("/2024-01-01/2024-12-31", "2025-01-01");
        assert_eq!(status_text(&data), "Completed 1 day ago");
    }

    #[test]
    fn completed_zero_days_ago_is_plural() {
        let data = data_at("/2024-01-01/2024-12-31", "2024-12-31T06:00:00Z");
        assert_eq!(status_text(&data), "Completed 0 days ago");
    }

    #[test]
    fn days_between_rounds() {
        let start = parse_date("2024-01-01").unwrap();
        assert_eq!(days_between(start, parse_date("2024-01-01T13:00").unwrap()), 1);
        assert_eq!(days_between(start, parse_date("2024-01-01T11:00").unwrap()), 0);
    }

    #[test]
    fn share_text_variants() {
        let running = data_at("/2024-01-01/2024-01-11/Sprint", "2024-01-06");
        assert_eq!(
            share_text(&running),
            "Sprint: 50.00% complete (Monday, 1 January 2024 to Thursday, 11 January 2024)"
        );

        let upcoming = data_at("/2024-01-01/2024-01-11/Sprint", "2023-12-01");
        assert_eq!(
            share_text(&upcoming),
            "Sprint: Starting Monday, 1 January 2024, ending Thursday, 11 January 2024"
        );

        let done = data_at("/2024-01-01/2024-01-11/Sprint", "2024-02-01");
        assert_eq!(
            share_text(&done),
            "Sprint: Completed Thursday, 11 January 2024 (started Monday, 1 January 2024)"
        );
    }
}
