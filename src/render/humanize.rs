//! render::humanize
//!
//! Human-readable durations and byte sizes.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

const MINUTES_IN_YEAR: i64 = 525_600;
const MINUTES_IN_QUARTER_YEAR: i64 = 131_400;
const MINUTES_IN_THREE_QUARTERS_YEAR: i64 = 394_200;

const SIZE_UNITS: [&str; 6] = ["KB", "MB", "GB", "TB", "PB", "EB"];

fn plural(count: i64, singular: &str) -> String {
    if count == 1 {
        format!("1 {}", singular)
    } else {
        format!("{} {}s", count, singular)
    }
}

fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}

/// Approximate distance between two instants in words.
///
/// Order does not matter. Distances are bucketed by rounded minutes:
///
/// | minutes        | result                      |
/// |----------------|-----------------------------|
/// | 0              | less than 1 minute          |
/// | 1..45          | N minutes                   |
/// | 45..90         | about 1 hour                |
/// | 90..1440       | about N hours               |
/// | 1440..2520     | 1 day                       |
/// | 2520..43200    | N days                      |
/// | 43200..86400   | about N months              |
/// | 86400..525600  | N months                    |
/// | beyond         | about / over / almost N years |
pub fn distance_in_words(a: DateTime<Utc>, b: DateTime<Utc>) -> String {
    let (from, to) = if a <= b { (a, b) } else { (b, a) };
    let minutes = ((to - from).num_milliseconds() as f64 / 60_000.0).round() as i64;

    match minutes {
        0 => "less than 1 minute".to_string(),
        1..=44 => plural(minutes, "minute"),
        45..=89 => "about 1 hour".to_string(),
        90..=1439 => format!(
            "about {}",
            plural((minutes as f64 / 60.0).round() as i64, "hour")
        ),
        1440..=2519 => "1 day".to_string(),
        2520..=43199 => plural((minutes as f64 / 1440.0).round() as i64, "day"),
        43200..=86399 => format!(
            "about {}",
            plural((minutes as f64 / 43200.0).round() as i64, "month")
        ),
        86400..=525_599 => plural((minutes as f64 / 43200.0).round() as i64, "month"),
        _ => years_in_words(from, to, minutes),
    }
}

fn years_in_words(from: DateTime<Utc>, to: DateTime<Utc>, minutes: i64) -> String {
    let mut from_year = from.year();
    if from.month() >= 3 {
        from_year += 1;
    }
    let mut to_year = to.year();
    if to.month() < 3 {
        to_year -= 1;
    }
    let leap_years = if from_year > to_year {
        0
    } else {
        (from_year..=to_year).filter(|y| is_leap_year(*y)).count() as i64
    };

    let minutes = minutes - leap_years * 1440;
    let years = minutes / MINUTES_IN_YEAR;
    let remainder = minutes % MINUTES_IN_YEAR;

    if remainder < MINUTES_IN_QUARTER_YEAR {
        format!("about {}", plural(years, "year"))
    } else if remainder < MINUTES_IN_THREE_QUARTERS_YEAR {
        format!("over {}", plural(years, "year"))
    } else {
        format!("almost {}", plural(years + 1, "year"))
    }
}

/// `"<distance> ago"` for an instant relative to `now`.
pub fn time_ago(instant: DateTime<Utc>, now: DateTime<Utc>) -> String {
    format!("{} ago", distance_in_words(instant, now))
}

/// Format a byte count with binary units and two decimals.
///
/// Counts below 1024 are shown as whole bytes.
pub fn human_size(bytes: u64) -> String {
    if bytes < 1024 {
        return if bytes == 1 {
            "1 Byte".to_string()
        } else {
            format!("{} Bytes", bytes)
        };
    }

    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", value, SIZE_UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn minutes_later(minutes: i64) -> String {
        let start = at(2022, 6, 1);
        distance_in_words(start, start + chrono::Duration::minutes(minutes))
    }

    mod distance_in_words {
        use super::*;

        #[test]
        fn minutes() {
            assert_eq!(minutes_later(0), "less than 1 minute");
            assert_eq!(minutes_later(1), "1 minute");
            assert_eq!(minutes_later(44), "44 minutes");
        }

        #[test]
        fn hours() {
            assert_eq!(minutes_later(45), "about 1 hour");
            assert_eq!(minutes_later(89), "about 1 hour");
            assert_eq!(minutes_later(90), "about 2 hours");
            assert_eq!(minutes_later(1439), "about 24 hours");
        }

        #[test]
        fn days() {
            assert_eq!(minutes_later(1440), "1 day");
            assert_eq!(minutes_later(2520), "2 days");
            assert_eq!(minutes_later(43199), "30 days");
        }

        #[test]
        fn months() {
            assert_eq!(minutes_later(43200), "about 1 month");
            assert_eq!(minutes_later(86400), "2 months");
            assert_eq!(minutes_later(525_599), "12 months");
        }

        #[test]
        fn end_of_month_boundaries() {
            assert_eq!(distance_in_words(at(2022, 10, 31), at(2022, 12, 31)), "2 months");
            assert_eq!(distance_in_words(at(2022, 10, 31), at(2022, 11, 1)), "1 day");
        }

        #[test]
        fn years() {
            assert_eq!(distance_in_words(at(2020, 1, 1), at(2021, 1, 1)), "about 1 year");
            assert_eq!(distance_in_words(at(2020, 1, 1), at(2021, 6, 1)), "over 1 year");
            assert_eq!(distance_in_words(at(2020, 1, 1), at(2021, 11, 1)), "almost 2 years");
            assert_eq!(distance_in_words(at(2010, 3, 1), at(2020, 3, 1)), "about 10 years");
        }

        #[test]
        fn order_does_not_matter() {
            assert_eq!(
                distance_in_words(at(2022, 12, 31), at(2022, 10, 31)),
                distance_in_words(at(2022, 10, 31), at(2022, 12, 31))
            );
        }
    }

    #[test]
    fn time_ago_appends_suffix() {
        assert_eq!(time_ago(at(2022, 10, 31), at(2022, 12, 31)), "2 months ago");
    }

    mod human_size {
        use super::*;

        #[test]
        fn bytes() {
            assert_eq!(human_size(0), "0 Bytes");
            assert_eq!(human_size(1), "1 Byte");
            assert_eq!(human_size(1023), "1023 Bytes");
        }

        #[test]
        fn scaled_units() {
            assert_eq!(human_size(1024), "1.00 KB");
            assert_eq!(human_size(1536), "1.50 KB");
            assert_eq!(human_size(5 * 1024 * 1024), "5.00 MB");
            assert_eq!(human_size(3 * 1024 * 1024 * 1024), "3.00 GB");
        }
    }
}
