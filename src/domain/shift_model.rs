// =====================
// Shift / event domain models
// =====================

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

pub type ShiftId = i64;
pub type EventId = i64;

/// Code stored in `shift_type` for shifts with their own start/end time.
pub const CUSTOM_SHIFT_CODE: &str = "custom";

/// Role shown when a shift was saved without one.
pub const DEFAULT_ROLE: &str = "Volunteer";

/// The fixed afternoon/evening slots the venue runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PresetSlot {
    #[serde(rename = "12-3")]
    TwelveToThree,
    #[serde(rename = "3-6")]
    ThreeToSix,
    #[serde(rename = "6-9")]
    SixToNine,
    #[serde(rename = "9-11")]
    NineToEleven,
}

impl PresetSlot {
    pub const ALL: [PresetSlot; 4] = [
        PresetSlot::TwelveToThree,
        PresetSlot::ThreeToSix,
        PresetSlot::SixToNine,
        PresetSlot::NineToEleven,
    ];

    /// Value stored in the `shift_type` column.
    pub fn code(self) -> &'static str {
        match self {
            PresetSlot::TwelveToThree => "12-3",
            PresetSlot::ThreeToSix => "3-6",
            PresetSlot::SixToNine => "6-9",
            PresetSlot::NineToEleven => "9-11",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PresetSlot::TwelveToThree => "12-3pm",
            PresetSlot::ThreeToSix => "3-6pm",
            PresetSlot::SixToNine => "6-9pm",
            PresetSlot::NineToEleven => "9-11pm",
        }
    }

    /// Start hour on the 24h clock. Every preset is afternoon/evening,
    /// so the written hour gets +12 when it is below 12.
    pub fn start_hour(self) -> u32 {
        let written: u32 = match self {
            PresetSlot::TwelveToThree => 12,
            PresetSlot::ThreeToSix => 3,
            PresetSlot::SixToNine => 6,
            PresetSlot::NineToEleven => 9,
        };
        if written < 12 { written + 12 } else { written }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|slot| slot.code() == code.trim())
    }
}

/// When a shift runs.
///
/// Stored as the triple `(shift_type, custom_start, custom_end)`; the
/// "custom iff both times are set" rule is what this enum encodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ShiftTime {
    Preset(PresetSlot),
    Custom { start: NaiveTime, end: NaiveTime },
    /// Anything the store holds that is neither a preset nor a complete
    /// custom range. Kept so one bad row never breaks a day's view.
    Unrecognised(String),
}

impl ShiftTime {
    pub fn from_parts(
        shift_type: &str,
        custom_start: Option<NaiveTime>,
        custom_end: Option<NaiveTime>,
    ) -> Self {
        if let Some(slot) = PresetSlot::from_code(shift_type) {
            return ShiftTime::Preset(slot);
        }
        match (shift_type.trim() == CUSTOM_SHIFT_CODE, custom_start, custom_end) {
            (true, Some(start), Some(end)) => ShiftTime::Custom { start, end },
            _ => ShiftTime::Unrecognised(shift_type.to_string()),
        }
    }

    /// Inverse of [`ShiftTime::from_parts`].
    pub fn to_parts(&self) -> (String, Option<NaiveTime>, Option<NaiveTime>) {
        match self {
            ShiftTime::Preset(slot) => (slot.code().to_string(), None, None),
            ShiftTime::Custom { start, end } => {
                (CUSTOM_SHIFT_CODE.to_string(), Some(*start), Some(*end))
            }
            ShiftTime::Unrecognised(raw) => (raw.clone(), None, None),
        }
    }

    pub fn label(&self) -> String {
        match self {
            ShiftTime::Preset(slot) => slot.label().to_string(),
            ShiftTime::Custom { start, end } => format_time_range_compact(*start, *end),
            ShiftTime::Unrecognised(raw) => raw.clone(),
        }
    }

    /// Minutes since midnight at which the shift starts; 0 when unknown.
    pub fn start_minutes(&self) -> u32 {
        match self {
            ShiftTime::Preset(slot) => slot.start_hour() * 60,
            ShiftTime::Custom { start, .. } => start.hour() * 60 + start.minute(),
            ShiftTime::Unrecognised(_) => 0,
        }
    }
}

/// `17:30`-`20:00` -> `5:30-8pm`, `11:00`-`14:00` -> `11am-2pm`.
pub fn format_time_range_compact(start: NaiveTime, end: NaiveTime) -> String {
    fn parts(t: NaiveTime) -> (String, &'static str) {
        let (is_pm, h12) = t.hour12();
        let text = if t.minute() == 0 {
            format!("{}", h12)
        } else {
            format!("{}:{:02}", h12, t.minute())
        };
        (text, if is_pm { "pm" } else { "am" })
    }

    let (s, s_half) = parts(start);
    let (e, e_half) = parts(end);
    if s_half == e_half {
        format!("{}-{}{}", s, e, e_half)
    } else {
        format!("{}{}-{}{}", s, s_half, e, e_half)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "volunteer", rename_all = "snake_case")]
pub enum ShiftStatus {
    Filled(String),
    Unfilled,
    /// Marks a recurring requirement as intentionally dropped for one date.
    Cancelled,
}

impl ShiftStatus {
    pub fn code(&self) -> &'static str {
        match self {
            ShiftStatus::Filled(_) => "filled",
            ShiftStatus::Unfilled => "unfilled",
            ShiftStatus::Cancelled => "cancelled",
        }
    }

    pub fn volunteer_name(&self) -> Option<&str> {
        match self {
            ShiftStatus::Filled(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, ShiftStatus::Filled(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftRecord {
    pub id: ShiftId,
    pub date: NaiveDate,
    pub status: ShiftStatus,
    pub role: Option<String>,
    pub time: ShiftTime,
}

impl ShiftRecord {
    pub fn role_or_default(&self) -> &str {
        match self.role.as_deref() {
            Some(role) if !role.trim().is_empty() => role,
            _ => DEFAULT_ROLE,
        }
    }
}

/// Write model for creating or replacing a shift row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewShift {
    pub date: NaiveDate,
    pub status: ShiftStatus,
    pub role: Option<String>,
    pub time: ShiftTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub id: EventId,
    pub title: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl EventRecord {
    pub fn time_label(&self) -> String {
        format_time_range_compact(self.start_time, self.end_time)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub title: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}
