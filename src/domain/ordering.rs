use crate::domain::opening_hours::ExpectedShift;
use crate::domain::shift_model::ShiftRecord;

/// Filled entries get status 0, everything else 1; the status weighs more
/// than any time of day.
const STATUS_WEIGHT: u32 = 10_000;

/// Anything that can be placed in a shift list.
pub trait ShiftOrdering {
    fn has_volunteer(&self) -> bool;
    fn start_minutes(&self) -> u32;

    fn sort_value(&self) -> u32 {
        let status_score = if self.has_volunteer() { 0 } else { 1 };
        status_score * STATUS_WEIGHT + self.start_minutes()
    }
}

impl ShiftOrdering for ShiftRecord {
    // cancelled rows have no volunteer, so they sort with the open ones
    fn has_volunteer(&self) -> bool {
        self.status.is_filled()
    }

    fn start_minutes(&self) -> u32 {
        self.time.start_minutes()
    }
}

impl ShiftOrdering for ExpectedShift {
    fn has_volunteer(&self) -> bool {
        false
    }

    fn start_minutes(&self) -> u32 {
        self.slot.start_hour() * 60
    }
}

impl<T: ShiftOrdering + ?Sized> ShiftOrdering for &T {
    fn has_volunteer(&self) -> bool {
        (**self).has_volunteer()
    }

    fn start_minutes(&self) -> u32 {
        (**self).start_minutes()
    }
}

/// Filled before unfilled, then earliest start first.
/// Stable: equal keys keep their input order.
pub fn sort_shifts<T: ShiftOrdering>(items: &mut [T]) {
    items.sort_by_key(|item| item.sort_value());
}

#[cfg(test)]
mod ordering_tests {
    use super::*;
    use crate::domain::shift_model::{PresetSlot, ShiftStatus, ShiftTime};
    use chrono::{NaiveDate, NaiveTime};

    fn record(id: i64, status: ShiftStatus, time: ShiftTime) -> ShiftRecord {
        ShiftRecord {
            id,
            date: NaiveDate::from_ymd_opt(2026, 10, 25).unwrap(),
            status,
            role: Some("Bar Staff".to_string()),
            time,
        }
    }

    #[test]
    fn sort_value_combines_status_and_time() {
        let filled = record(1, ShiftStatus::Filled("Alice".into()), ShiftTime::Preset(PresetSlot::ThreeToSix));
        let open = record(2, ShiftStatus::Unfilled, ShiftTime::Preset(PresetSlot::TwelveToThree));
        assert_eq!(filled.sort_value(), 900);
        assert_eq!(open.sort_value(), 10_720);
    }

    #[test]
    fn custom_start_uses_minutes() {
        let t = ShiftTime::Custom {
            start: NaiveTime::from_hms_opt(17, 30, 0).unwrap(),
            end: NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
        };
        assert_eq!(record(1, ShiftStatus::Filled("Bo".into()), t).sort_value(), 17 * 60 + 30);
    }

    #[test]
    fn filled_first_then_time_and_stable() {
        let mut list = vec![
            record(1, ShiftStatus::Unfilled, ShiftTime::Preset(PresetSlot::TwelveToThree)),
            record(2, ShiftStatus::Filled("B".into()), ShiftTime::Preset(PresetSlot::SixToNine)),
            record(3, ShiftStatus::Filled("C".into()), ShiftTime::Preset(PresetSlot::ThreeToSix)),
            record(4, ShiftStatus::Filled("D".into()), ShiftTime::Preset(PresetSlot::ThreeToSix)),
            record(5, ShiftStatus::Unfilled, ShiftTime::Unrecognised("??".into())),
        ];
        sort_shifts(&mut list);
        let ids: Vec<i64> = list.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 4, 2, 5, 1]);
    }
}
