use chrono::{Datelike, Days, Months, NaiveDate};

use crate::domain::date_range::DateRange;

/// The month grid always shows six full weeks.
pub const MONTH_GRID_DAYS: u64 = 42;

pub fn first_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    // first of next month, minus a day
    date.with_day(1)
        .and_then(|first| first.checked_add_months(Months::new(1)))
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}

/// Monday on or before `date`.
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_monday() as u64;
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

/// Monday..Sunday week containing `date`.
pub fn week_range(date: NaiveDate) -> DateRange {
    let monday = monday_of(date);
    let sunday = monday.checked_add_days(Days::new(6)).unwrap_or(monday);
    DateRange::new(monday, sunday)
}

/// 42-day grid for the month containing `date`, starting on the Monday on
/// or before the 1st.
///
/// ```text
///  Mo Tu We Th Fr Sa Su
///  28 29 30  1  2  3  4   <- grid starts on Mon 28th of the previous month
///   5  6  7  8  9 10 11
///  ...                    <- six rows in total
/// ```
pub fn month_grid_range(date: NaiveDate) -> DateRange {
    let first = date.with_day(1).unwrap_or(date);
    let start = monday_of(first);
    let end = start
        .checked_add_days(Days::new(MONTH_GRID_DAYS - 1))
        .unwrap_or(start);
    DateRange::new(start, end)
}

/// Whole calendar month containing `date`.
pub fn month_range(date: NaiveDate) -> DateRange {
    DateRange::new(date.with_day(1).unwrap_or(date), last_of_month(date))
}

/// Move by whole months; the day is clamped to the target month's length.
pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let step = Months::new(months.unsigned_abs());
    let moved = if months >= 0 {
        date.checked_add_months(step)
    } else {
        date.checked_sub_months(step)
    };
    moved.unwrap_or(date)
}

pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    let step = Days::new(days.unsigned_abs());
    let moved = if days >= 0 {
        date.checked_add_days(step)
    } else {
        date.checked_sub_days(step)
    };
    moved.unwrap_or(date)
}

#[cfg(test)]
mod time_tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_grid_starts_on_monday_and_spans_six_weeks() {
        // October 2026 starts on a Thursday
        let grid = month_grid_range(ymd(2026, 10, 19));
        assert_eq!(grid.start, ymd(2026, 9, 28));
        assert_eq!(grid.end, ymd(2026, 11, 8));
        assert_eq!(grid.len_days(), 42);
    }

    #[test]
    fn month_starting_on_monday_has_no_lead_in() {
        // June 2026 starts on a Monday
        assert_eq!(month_grid_range(ymd(2026, 6, 15)).start, ymd(2026, 6, 1));
    }

    #[test]
    fn week_range_runs_monday_to_sunday() {
        let week = week_range(ymd(2026, 10, 18)); // Sunday
        assert_eq!(week.start, ymd(2026, 10, 12));
        assert_eq!(week.end, ymd(2026, 10, 18));
    }

    #[test]
    fn last_day_handles_leap_years_and_december() {
        assert_eq!(last_of_month(ymd(2028, 2, 10)), ymd(2028, 2, 29));
        assert_eq!(last_of_month(ymd(2026, 12, 1)), ymd(2026, 12, 31));
    }

    #[test]
    fn add_months_clamps_day() {
        assert_eq!(add_months(ymd(2026, 1, 31), 1), ymd(2026, 2, 28));
        assert_eq!(add_months(ymd(2026, 1, 15), -1), ymd(2025, 12, 15));
    }
}
