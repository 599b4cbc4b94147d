use std::collections::HashMap;

use chrono::NaiveDate;

use crate::application::time::{first_of_month, last_of_month};
use crate::domain::date_range::DateRange;
use crate::domain::grouping::UnfilledItem;
use crate::domain::opening_hours::OpeningHours;
use crate::domain::reconcile::{compute_unfilled, Visibility};
use crate::domain::shift_model::ShiftRecord;

/// Shareable "volunteers needed" message for one month (1-12).
///
/// Past days are skipped. Returns `None` when no upcoming day needs anyone,
/// or when `year`/`month` do not name a real month.
pub fn unfilled_digest(
    venue: &str,
    year: i32,
    month: u32,
    today: NaiveDate,
    shifts: &[ShiftRecord],
    hours: &OpeningHours,
) -> Option<String> {
    let first = first_of_month(year, month)?;
    let month_days = DateRange::new(first, last_of_month(first));
    // past days are never listed
    let visibility = Visibility::new(today, false);

    let mut by_date: HashMap<NaiveDate, Vec<ShiftRecord>> = HashMap::new();
    for shift in shifts.iter().filter(|s| month_days.contains(s.date)) {
        by_date.entry(shift.date).or_default().push(shift.clone());
    }

    let mut body = String::new();
    for date in month_days.days() {
        let day_shifts = by_date.get(&date).map(Vec::as_slice).unwrap_or(&[]);
        let reconciliation = compute_unfilled(date, day_shifts, hours.expected_shifts(date), &visibility);
        if reconciliation.is_empty() {
            continue;
        }

        // requirements first, then stored rows
        let needed = reconciliation
            .unfilled_requirements
            .iter()
            .map(UnfilledItem::Expected)
            .chain(
                reconciliation
                    .placeholder_records
                    .iter()
                    .chain(reconciliation.unfilled_records.iter())
                    .map(UnfilledItem::Stored),
            );

        body.push_str(&format!("*{}*\n", date.format("%a %-d %b")));
        for item in needed {
            body.push_str(&format!("- {} ({})\n", item.role(), item.time_label()));
        }
        body.push('\n');
    }

    if body.is_empty() {
        return None;
    }

    Some(format!(
        "*{} Volunteer Rota - Unfilled Shifts for {}*\n\n{}Please reply if you can cover any of these!",
        venue,
        first.format("%B %Y"),
        body
    ))
}

#[cfg(test)]
mod digest_tests {
    use super::*;
    use crate::domain::shift_model::{PresetSlot, ShiftStatus, ShiftTime};
    use pretty_assertions::assert_eq;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn shift(id: i64, date: NaiveDate, status: ShiftStatus, slot: PresetSlot, role: &str) -> ShiftRecord {
        ShiftRecord {
            id,
            date,
            status,
            role: Some(role.to_string()),
            time: ShiftTime::Preset(slot),
        }
    }

    #[test]
    fn lists_upcoming_days_only() {
        // only Fri 23rd and the Sat 31st ad-hoc row are still open
        let today = ymd(2026, 10, 23);
        let hours = OpeningHours::default();
        let shifts = vec![
            shift(1, ymd(2026, 10, 24), ShiftStatus::Filled("Alice".into()), PresetSlot::ThreeToSix, "Bar Staff"),
            shift(2, ymd(2026, 10, 25), ShiftStatus::Cancelled, PresetSlot::TwelveToThree, "Bar Staff"),
            shift(3, ymd(2026, 10, 25), ShiftStatus::Filled("Bo".into()), PresetSlot::ThreeToSix, "Bar Staff"),
            shift(4, ymd(2026, 10, 28), ShiftStatus::Filled("Cy".into()), PresetSlot::ThreeToSix, "Bar Staff"),
            shift(5, ymd(2026, 10, 30), ShiftStatus::Filled("Di".into()), PresetSlot::ThreeToSix, "Bar Staff"),
            shift(6, ymd(2026, 10, 31), ShiftStatus::Unfilled, PresetSlot::SixToNine, "Bar Help"),
            shift(7, ymd(2026, 10, 31), ShiftStatus::Filled("Ed".into()), PresetSlot::ThreeToSix, "Bar Staff"),
        ];

        let message = unfilled_digest("The Blue Pig", 2026, 10, today, &shifts, &hours).unwrap();
        assert_eq!(
            message,
            "*The Blue Pig Volunteer Rota - Unfilled Shifts for October 2026*\n\n\
             *Fri 23 Oct*\n- Bar Staff (3-6pm)\n\n\
             *Sat 31 Oct*\n- Bar Help (6-9pm)\n\n\
             Please reply if you can cover any of these!"
        );
    }

    #[test]
    fn nothing_needed_gives_none() {
        let today = ymd(2026, 10, 19);
        assert_eq!(unfilled_digest("Pub", 2026, 10, today, &[], &OpeningHours::empty()), None);
    }

    #[test]
    fn bad_month_gives_none() {
        let today = ymd(2026, 10, 19);
        assert_eq!(unfilled_digest("Pub", 2026, 13, today, &[], &OpeningHours::default()), None);
    }
}
