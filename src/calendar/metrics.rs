//! Day-counting helpers used to size recurring weekly and daily allowances.

use chrono::{Datelike, NaiveDate, Weekday};

/// Counts occurrences of `weekday` between `start` and `end`, inclusive.
pub fn count_weekday(start: NaiveDate, end: NaiveDate, weekday: Weekday) -> u32 {
    if end < start {
        return 0;
    }
    start
        .iter_days()
        .take_while(|day| *day <= end)
        .filter(|day| day.weekday() == weekday)
        .count() as u32
}

/// Saturdays in a period, the multiplier for the weekly allowance.
pub fn count_saturdays(start: NaiveDate, end: NaiveDate) -> u32 {
    count_weekday(start, end, Weekday::Sat)
}

/// Number of days between `start` and `end`, counting both endpoints.
pub fn days_inclusive(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

/// Days left until the period closes. `None` once the period has closed;
/// archived periods report "not applicable" instead of a negative count.
pub fn days_remaining(end: NaiveDate, today: NaiveDate) -> Option<i64> {
    if today > end {
        None
    } else {
        Some((end - today).num_days())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn four_full_weeks_contain_each_weekday_four_times() {
        let start = date(2025, 3, 3);
        let end = date(2025, 3, 30);
        assert_eq!(days_inclusive(start, end), 28);
        for weekday in [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ] {
            assert_eq!(count_weekday(start, end, weekday), 4);
        }
    }

    #[test]
    fn single_day_counts_itself() {
        let day = date(2025, 3, 8);
        assert_eq!(days_inclusive(day, day), 1);
        assert_eq!(count_weekday(day, day, Weekday::Sat), 1);
        assert_eq!(count_weekday(day, day, Weekday::Sun), 0);
    }

    #[test]
    fn inverted_range_counts_nothing() {
        assert_eq!(count_weekday(date(2025, 3, 10), date(2025, 3, 9), Weekday::Mon), 0);
    }

    #[test]
    fn days_remaining_reports_sentinel_after_close() {
        let end = date(2025, 3, 31);
        assert_eq!(days_remaining(end, date(2025, 3, 29)), Some(2));
        assert_eq!(days_remaining(end, end), Some(0));
        assert_eq!(days_remaining(end, date(2025, 4, 1)), None);
    }
}
