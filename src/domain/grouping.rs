use std::collections::HashMap;

use serde::Serialize;

use crate::domain::opening_hours::ExpectedShift;
use crate::domain::ordering::ShiftOrdering;
use crate::domain::reconcile::Reconciliation;
use crate::domain::shift_model::{ShiftId, ShiftRecord, ShiftTime};

/// One open slot waiting for a volunteer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnfilledItem<'a> {
    /// A requirement with no row behind it yet.
    Expected(&'a ExpectedShift),
    /// A persisted unfilled row.
    Stored(&'a ShiftRecord),
}

impl<'a> UnfilledItem<'a> {
    pub fn time(&self) -> ShiftTime {
        match self {
            UnfilledItem::Expected(expected) => ShiftTime::Preset(expected.slot),
            UnfilledItem::Stored(record) => record.time.clone(),
        }
    }

    pub fn time_label(&self) -> String {
        match self {
            UnfilledItem::Expected(expected) => expected.slot.label().to_string(),
            UnfilledItem::Stored(record) => record.time.label(),
        }
    }

    pub fn role(&self) -> &'a str {
        match self {
            UnfilledItem::Expected(expected) => &expected.role,
            UnfilledItem::Stored(record) => record.role_or_default(),
        }
    }

    pub fn stored_id(&self) -> Option<ShiftId> {
        match self {
            UnfilledItem::Expected(_) => None,
            UnfilledItem::Stored(record) => Some(record.id),
        }
    }
}

impl ShiftOrdering for UnfilledItem<'_> {
    fn has_volunteer(&self) -> bool {
        match self {
            UnfilledItem::Expected(expected) => expected.has_volunteer(),
            UnfilledItem::Stored(record) => record.has_volunteer(),
        }
    }

    fn start_minutes(&self) -> u32 {
        match self {
            UnfilledItem::Expected(expected) => expected.start_minutes(),
            UnfilledItem::Stored(record) => record.start_minutes(),
        }
    }
}

/// Items of a reconciliation in display-feed order: stored rows
/// (placeholders, then ad-hoc), then bare requirements.
pub fn unfilled_items(reconciliation: &Reconciliation) -> Vec<UnfilledItem<'_>> {
    reconciliation
        .placeholder_records
        .iter()
        .chain(reconciliation.unfilled_records.iter())
        .map(UnfilledItem::Stored)
        .chain(reconciliation.unfilled_requirements.iter().map(UnfilledItem::Expected))
        .collect()
}

/// Same time label and role, merged into one line with a count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnfilledGroup {
    pub label: String,
    pub role: String,
    pub count: usize,
    pub backing_ids: Vec<ShiftId>,
    /// No row backs any slot in the group.
    pub is_virtual: bool,
    /// Time of the first item, used to pre-fill a sign-up for this slot.
    pub time: ShiftTime,
    pub sort_value: u32,
}

impl UnfilledGroup {
    pub fn key(&self) -> String {
        group_key(&self.label, &self.role)
    }

    /// `Volunteer Needed` / `3 Volunteers Needed`.
    pub fn needed_text(&self) -> String {
        if self.count > 1 {
            format!("{} Volunteers Needed", self.count)
        } else {
            "Volunteer Needed".to_string()
        }
    }
}

fn group_key(label: &str, role: &str) -> String {
    format!("{}|{}", label, role)
}

/// Merge items sharing `label|role`; groups come back earliest first.
pub fn group_unfilled(items: &[UnfilledItem<'_>]) -> Vec<UnfilledGroup> {
    let mut groups: Vec<UnfilledGroup> = Vec::new();
    let mut index_by_key: HashMap<String, usize> = HashMap::new();

    for item in items {
        let label = item.time_label();
        let role = item.role();
        let key = group_key(&label, role);

        let index = *index_by_key.entry(key).or_insert_with(|| {
            groups.push(UnfilledGroup {
                label,
                role: role.to_string(),
                count: 0,
                backing_ids: Vec::new(),
                is_virtual: true,
                time: item.time(),
                sort_value: item.sort_value(),
            });
            groups.len() - 1
        });

        let group = &mut groups[index];
        group.count += 1;
        if let Some(id) = item.stored_id() {
            group.backing_ids.push(id);
            group.is_virtual = false;
        }
    }

    groups.sort_by_key(|group| group.sort_value);
    groups
}

/// Group already grouped summaries again. Each summary counts as one item
/// carrying its own count, so nothing is counted twice.
pub fn merge_groups(groups: Vec<UnfilledGroup>) -> Vec<UnfilledGroup> {
    let mut merged: Vec<UnfilledGroup> = Vec::new();
    let mut index_by_key: HashMap<String, usize> = HashMap::new();

    for group in groups {
        match index_by_key.get(&group.key()) {
            Some(&index) => {
                let target = &mut merged[index];
                target.count += group.count;
                target.backing_ids.extend(group.backing_ids);
                target.is_virtual = target.is_virtual && group.is_virtual;
            }
            None => {
                index_by_key.insert(group.key(), merged.len());
                merged.push(group);
            }
        }
    }

    merged.sort_by_key(|group| group.sort_value);
    merged
}
