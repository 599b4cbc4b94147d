use chrono::NaiveDate;
use serde::Serialize;

use crate::application::calendar::CalendarView;
use crate::domain::date_range::DateRange;
use crate::domain::grouping::UnfilledGroup;
use crate::domain::shift_model::{EventRecord, ShiftRecord};

/// Everything one day card shows.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayView {
    pub date: NaiveDate,
    pub is_today: bool,
    pub is_past: bool,
    pub is_regular_day: bool,
    /// false for the lead-in/trailing days of the month grid
    pub in_focus_month: bool,
    pub events: Vec<EventRecord>,
    /// taken shifts, earliest first
    pub filled: Vec<ShiftRecord>,
    pub unfilled: Vec<UnfilledGroup>,
    pub can_add_shift: bool,
    pub can_add_event: bool,
}

impl DayView {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.filled.is_empty() && self.unfilled.is_empty()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarPage {
    pub view: CalendarView,
    pub title: String,
    pub range: DateRange,
    pub days: Vec<DayView>,
}
