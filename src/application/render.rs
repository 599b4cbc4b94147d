use std::fmt::Write;

use crate::application::dto::{CalendarPage, DayView};

/// Plain-text rendering of a page for the terminal.
///
/// Only days with something on them, regular opening days and today are
/// printed. Month-grid days outside the focus month are left out.
pub fn render_page(page: &CalendarPage) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", page.title);
    let _ = writeln!(out, "{}", "=".repeat(page.title.chars().count()));

    let mut printed = 0;
    for day in page.days.iter().filter(|day| shows_day(day)) {
        out.push('\n');
        render_day(&mut out, day);
        printed += 1;
    }

    if printed == 0 {
        out.push_str("\nNothing scheduled.\n");
    }
    out
}

fn shows_day(day: &DayView) -> bool {
    day.in_focus_month && (!day.is_empty() || day.is_regular_day || day.is_today)
}

fn render_day(out: &mut String, day: &DayView) {
    let mut heading = day.date.format("%a %-d %b").to_string();
    if day.is_today {
        heading.push_str(" (today)");
    }
    let _ = writeln!(out, "{}", heading);

    for event in &day.events {
        let _ = writeln!(out, "  * {:<10} {}", event.time_label(), event.title);
    }

    for shift in &day.filled {
        let name = shift.status.volunteer_name().unwrap_or_default();
        let _ = writeln!(
            out,
            "  {:<12} {:<16} {} [#{}]",
            shift.time.label(),
            shift.role_or_default(),
            name,
            shift.id
        );
    }

    for group in &day.unfilled {
        let ids = if group.is_virtual {
            String::new()
        } else {
            let ids: Vec<String> = group.backing_ids.iter().map(|id| format!("#{}", id)).collect();
            format!(" [{}]", ids.join(", "))
        };
        let _ = writeln!(
            out,
            "  {:<12} {:<16} {}{}",
            group.label,
            group.role,
            group.needed_text(),
            ids
        );
    }

    if day.is_empty() {
        let _ = writeln!(out, "  -");
    }
}

#[cfg(test)]
mod render_tests {
    use super::*;
    use crate::application::calendar::{build_calendar_page, CalendarState, CalendarView};
    use crate::domain::date_range::DateRange;
    use crate::domain::opening_hours::OpeningHours;
    use crate::domain::shift_model::{PresetSlot, ShiftRecord, ShiftStatus, ShiftTime};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn renders_filled_and_needed_lines() {
        let today = ymd(2026, 10, 19);
        let mut state = CalendarState::new(CalendarView::List, today, false);
        state.set_list_range(DateRange::new(ymd(2026, 10, 25), ymd(2026, 10, 25)));

        let shifts = vec![ShiftRecord {
            id: 4,
            date: ymd(2026, 10, 25),
            status: ShiftStatus::Filled("Alice".to_string()),
            role: Some("Bar Staff".to_string()),
            time: ShiftTime::Preset(PresetSlot::TwelveToThree),
        }];
        let page = build_calendar_page(&state, today, &shifts, &[], &OpeningHours::default());

        assert_eq!(
            render_page(&page),
            "25 Oct - 25 Oct 2026\n\
             ====================\n\
             \n\
             Sun 25 Oct\n  \
             12-3pm       Bar Staff        Alice [#4]\n  \
             3-6pm        Bar Staff        Volunteer Needed\n"
        );
    }

    #[test]
    fn empty_page_says_so() {
        let today = ymd(2026, 10, 19);
        let mut state = CalendarState::new(CalendarView::List, today, false);
        // Mon 26 and Tue 27 are closing days
        state.set_list_range(DateRange::new(ymd(2026, 10, 26), ymd(2026, 10, 27)));
        let page = build_calendar_page(&state, today, &[], &[], &OpeningHours::default());
        assert!(render_page(&page).ends_with("Nothing scheduled.\n"));
    }
}
