use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Inclusive span of calendar days; `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawDateRange")]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Deserialize)]
struct RawDateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl From<RawDateRange> for DateRange {
    fn from(raw: RawDateRange) -> Self {
        DateRange::new(raw.start, raw.end)
    }
}

impl DateRange {
    /// Bounds given the wrong way round are swapped.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        if end < start {
            Self { start: end, end: start }
        } else {
            Self { start, end }
        }
    }

    pub fn single(date: NaiveDate) -> Self {
        Self { start: date, end: date }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// 0 for a range whose fields were set the wrong way round by hand.
    pub fn len_days(&self) -> usize {
        let span = (self.end - self.start).num_days();
        if span < 0 {
            0
        } else {
            span as usize + 1
        }
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let start = self.start;
        (0..self.len_days() as u64).filter_map(move |offset| start.checked_add_days(Days::new(offset)))
    }
}
