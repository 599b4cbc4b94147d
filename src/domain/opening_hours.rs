use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::domain::shift_model::PresetSlot;

/// One recurring obligation: on `weekday`, someone must cover `slot` as `role`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExpectedShift {
    pub weekday: Weekday,
    pub slot: PresetSlot,
    pub role: String,
}

impl ExpectedShift {
    pub fn new(weekday: Weekday, slot: PresetSlot, role: &str) -> Self {
        Self { weekday, slot, role: role.to_string() }
    }
}

/// Weekday -> required (slot, role) pairs. Order within a weekday matters:
/// the reconciler walks it front to back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpeningHours {
    // index: days from Sunday (0 = Sunday ... 6 = Saturday)
    days: [Vec<ExpectedShift>; 7],
}

impl Default for OpeningHours {
    /// Regular hours: Sunday 12-6pm as two bar shifts, Wed/Fri/Sat 3-6pm.
    fn default() -> Self {
        Self::from_entries(vec![
            ExpectedShift::new(Weekday::Sun, PresetSlot::TwelveToThree, "Bar Staff"),
            ExpectedShift::new(Weekday::Sun, PresetSlot::ThreeToSix, "Bar Staff"),
            ExpectedShift::new(Weekday::Wed, PresetSlot::ThreeToSix, "Bar Staff"),
            ExpectedShift::new(Weekday::Fri, PresetSlot::ThreeToSix, "Bar Staff"),
            ExpectedShift::new(Weekday::Sat, PresetSlot::ThreeToSix, "Bar Staff"),
        ])
    }
}

impl OpeningHours {
    pub fn empty() -> Self {
        Self { days: Default::default() }
    }

    pub fn from_entries<I: IntoIterator<Item = ExpectedShift>>(entries: I) -> Self {
        let mut hours = Self::empty();
        for entry in entries {
            hours.days[entry.weekday.num_days_from_sunday() as usize].push(entry);
        }
        hours
    }

    pub fn expected_for_weekday(&self, weekday: Weekday) -> &[ExpectedShift] {
        &self.days[weekday.num_days_from_sunday() as usize]
    }

    pub fn expected_shifts(&self, date: NaiveDate) -> &[ExpectedShift] {
        self.expected_for_weekday(date.weekday())
    }

    pub fn is_regular_day(&self, date: NaiveDate) -> bool {
        !self.expected_shifts(date).is_empty()
    }
}

#[cfg(test)]
mod opening_hours_tests {
    use super::*;

    #[test]
    fn default_table_matches_regular_days() {
        let hours = OpeningHours::default();
        let sunday = hours.expected_for_weekday(Weekday::Sun);
        assert_eq!(sunday.len(), 2);
        assert_eq!(sunday[0].slot, PresetSlot::TwelveToThree);
        assert_eq!(sunday[1].slot, PresetSlot::ThreeToSix);

        for day in [Weekday::Wed, Weekday::Fri, Weekday::Sat] {
            let expected = hours.expected_for_weekday(day);
            assert_eq!(expected.len(), 1);
            assert_eq!(expected[0].role, "Bar Staff");
        }
        for day in [Weekday::Mon, Weekday::Tue, Weekday::Thu] {
            assert!(hours.expected_for_weekday(day).is_empty());
        }
    }

    #[test]
    fn regular_day_lookup_by_date() {
        let hours = OpeningHours::default();
        // 2026-10-18 is a Sunday, 2026-10-19 a Monday
        assert!(hours.is_regular_day(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()));
        assert!(!hours.is_regular_day(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()));
    }
}
