// =====================
// Calendar state and day views
// =====================

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::application::dto::{CalendarPage, DayView};
use crate::application::time::{add_days, add_months, last_of_month, month_grid_range, week_range};
use crate::domain::date_range::DateRange;
use crate::domain::grouping::{group_unfilled, unfilled_items};
use crate::domain::opening_hours::OpeningHours;
use crate::domain::reconcile::{compute_unfilled, filled_shifts, Visibility};
use crate::domain::shift_model::{EventRecord, ShiftRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarView {
    List,
    Week,
    #[default]
    Month,
}

/// Handed out by [`CalendarState::begin_load`]; a snapshot fetched under an
/// older ticket must be dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// What the user is looking at. Passed explicitly into the page builders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarState {
    pub view: CalendarView,
    /// Any date inside the month/week being shown.
    pub anchor: NaiveDate,
    /// Chosen span for the list view; `None` until the user picks one.
    pub list_range: Option<DateRange>,
    pub admin: bool,
    generation: u64,
}

impl CalendarState {
    pub fn new(view: CalendarView, anchor: NaiveDate, admin: bool) -> Self {
        Self { view, anchor, list_range: None, admin, generation: 0 }
    }

    /// Days to fetch and show. `today` seeds the list view when no range was chosen.
    pub fn date_range(&self, today: NaiveDate) -> DateRange {
        match self.view {
            CalendarView::Month => month_grid_range(self.anchor),
            CalendarView::Week => week_range(self.anchor),
            CalendarView::List => self
                .list_range
                .unwrap_or_else(|| DateRange::new(today, last_of_month(today))),
        }
    }

    /// One step back (`-1`) or forward (`1`): a month in the month view, a week otherwise.
    pub fn navigate(&mut self, step: i32) {
        self.anchor = match self.view {
            CalendarView::Month => add_months(self.anchor, step),
            CalendarView::Week | CalendarView::List => add_days(self.anchor, i64::from(step) * 7),
        };
    }

    pub fn go_to_today(&mut self, today: NaiveDate) {
        self.anchor = today;
    }

    pub fn set_view(&mut self, view: CalendarView) {
        self.view = view;
    }

    pub fn set_list_range(&mut self, range: DateRange) {
        self.list_range = Some(range);
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        LoadTicket(self.generation)
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.generation
    }

    pub fn title(&self, today: NaiveDate) -> String {
        match self.view {
            CalendarView::Month => self.anchor.format("%B %Y").to_string(),
            CalendarView::Week | CalendarView::List => {
                let range = self.date_range(today);
                format!("{} - {}", range.start.format("%-d %b"), range.end.format("%-d %b %Y"))
            }
        }
    }

    fn in_focus(&self, date: NaiveDate) -> bool {
        match self.view {
            CalendarView::Month => {
                date.year() == self.anchor.year() && date.month() == self.anchor.month()
            }
            CalendarView::Week | CalendarView::List => true,
        }
    }
}

/// Build one day's card. Rows and events of other dates are ignored.
pub fn build_day_view(
    date: NaiveDate,
    shifts: &[ShiftRecord],
    events: &[EventRecord],
    hours: &OpeningHours,
    visibility: &Visibility,
    in_focus_month: bool,
) -> DayView {
    let is_past = date < visibility.today;

    // 1. open slots
    let reconciliation = compute_unfilled(date, shifts, hours.expected_shifts(date), visibility);
    let unfilled = group_unfilled(&unfilled_items(&reconciliation));

    // 2. taken slots
    let day_shifts: Vec<ShiftRecord> = shifts.iter().filter(|shift| shift.date == date).cloned().collect();
    let filled = filled_shifts(&day_shifts);

    // 3. events
    let mut day_events: Vec<EventRecord> =
        events.iter().filter(|event| event.date == date).cloned().collect();
    day_events.sort_by_key(|event| event.start_time);

    DayView {
        date,
        is_today: date == visibility.today,
        is_past,
        is_regular_day: hours.is_regular_day(date),
        in_focus_month,
        events: day_events,
        filled,
        unfilled,
        can_add_shift: !is_past || visibility.admin,
        can_add_event: visibility.admin,
    }
}

/// Build the whole page from one snapshot of shifts and events.
pub fn build_calendar_page(
    state: &CalendarState,
    today: NaiveDate,
    shifts: &[ShiftRecord],
    events: &[EventRecord],
    hours: &OpeningHours,
) -> CalendarPage {
    let range = state.date_range(today);
    let visibility = Visibility::new(today, state.admin);

    let mut shifts_by_date: HashMap<NaiveDate, Vec<ShiftRecord>> = HashMap::new();
    for shift in shifts.iter().filter(|s| range.contains(s.date)) {
        shifts_by_date.entry(shift.date).or_default().push(shift.clone());
    }

    let days = range
        .days()
        .map(|date| {
            let day_shifts = shifts_by_date.get(&date).map(Vec::as_slice).unwrap_or(&[]);
            build_day_view(date, day_shifts, events, hours, &visibility, state.in_focus(date))
        })
        .collect();

    CalendarPage {
        view: state.view,
        title: state.title(today),
        range,
        days,
    }
}
