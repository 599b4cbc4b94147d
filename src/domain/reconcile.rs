use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::opening_hours::ExpectedShift;
use crate::domain::ordering::sort_shifts;
use crate::domain::shift_model::{ShiftRecord, ShiftStatus, ShiftTime};

/// Who is looking, and when.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visibility {
    pub today: NaiveDate,
    pub admin: bool,
}

impl Visibility {
    pub fn new(today: NaiveDate, admin: bool) -> Self {
        Self { today, admin }
    }

    /// Past days show no "needed" warnings unless an admin is looking.
    pub fn shows_unfilled(&self, date: NaiveDate) -> bool {
        self.admin || date >= self.today
    }
}

/// Open slots for one date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reconciliation {
    /// Requirements with no stored row at all.
    pub unfilled_requirements: Vec<ExpectedShift>,
    /// Unfilled rows not tied to any requirement (ad-hoc requests).
    pub unfilled_records: Vec<ShiftRecord>,
    /// Unfilled rows that were stored for a requirement slot and consumed it.
    pub placeholder_records: Vec<ShiftRecord>,
}

impl Reconciliation {
    pub fn is_empty(&self) -> bool {
        self.unfilled_requirements.is_empty()
            && self.unfilled_records.is_empty()
            && self.placeholder_records.is_empty()
    }
}

fn satisfies(record: &ShiftRecord, expected: &ExpectedShift) -> bool {
    record.time == ShiftTime::Preset(expected.slot)
        && record.role.as_deref() == Some(expected.role.as_str())
}

/// Match the stored rows of `date` against its expected requirements.
///
/// Each requirement, in table order, consumes the first still-unused row with
/// the same slot and role, whatever that row's status (filled, unfilled or
/// cancelled). Rows of other dates in `stored` are ignored.
pub fn compute_unfilled(
    date: NaiveDate,
    stored: &[ShiftRecord],
    expected: &[ExpectedShift],
    visibility: &Visibility,
) -> Reconciliation {
    if !visibility.shows_unfilled(date) {
        return Reconciliation::default();
    }

    // 1. pool of the day's rows, in store order
    let mut pool: Vec<&ShiftRecord> = stored.iter().filter(|r| r.date == date).collect();
    let mut result = Reconciliation::default();

    // 2. each requirement consumes at most one row
    for requirement in expected {
        match pool.iter().position(|record| satisfies(record, requirement)) {
            Some(index) => {
                let consumed = pool.remove(index);
                if consumed.status == ShiftStatus::Unfilled {
                    result.placeholder_records.push(consumed.clone());
                }
            }
            None => result.unfilled_requirements.push(requirement.clone()),
        }
    }

    // 3. leftovers are ad-hoc rows
    result.unfilled_records = pool
        .into_iter()
        .filter(|record| record.status == ShiftStatus::Unfilled)
        .cloned()
        .collect();

    result
}

/// Taken shifts for display: filled rows only (never cancelled markers),
/// earliest first.
pub fn filled_shifts(records: &[ShiftRecord]) -> Vec<ShiftRecord> {
    let mut filled: Vec<ShiftRecord> = records
        .iter()
        .filter(|record| record.status.is_filled())
        .cloned()
        .collect();
    sort_shifts(&mut filled);
    filled
}
