use chrono::NaiveDate;
use tracing::{debug, info};

use crate::application::calendar::{build_calendar_page, CalendarState};
use crate::application::digest::unfilled_digest;
use crate::application::dto::CalendarPage;
use crate::application::time::{first_of_month, month_range};
use crate::domain::shift_model::*;
use crate::error::{Result, RotaError};
use crate::AppServices;

/// Most rows one "add shift" may create.
pub const MAX_QUANTITY: usize = 10;

// --- Shift Commands ---

/// Store a shift. `quantity` copies are created for an unfilled shift
/// (clamped to 1..=10); a filled or cancelled shift is always stored once.
pub async fn add_shift(services: &AppServices, shift: NewShift, quantity: usize) -> Result<Vec<ShiftId>> {
    let quantity = match shift.status {
        ShiftStatus::Unfilled => quantity.clamp(1, MAX_QUANTITY),
        _ => 1,
    };
    let ids = services.shifts.create_many(&shift, quantity).await?;
    info!(date = %shift.date, status = shift.status.code(), count = ids.len(), "shift added");
    Ok(ids)
}

pub async fn update_shift(services: &AppServices, id: ShiftId, shift: NewShift) -> Result<()> {
    services.shifts.update(id, &shift).await?;
    info!(shift_id = id, status = shift.status.code(), "shift updated");
    Ok(())
}

pub async fn delete_shift(services: &AppServices, id: ShiftId) -> Result<()> {
    services.shifts.delete(id).await?;
    info!(shift_id = id, "shift deleted");
    Ok(())
}

/// Mark a regular requirement as not needed on `date` by storing a
/// cancelled row that the reconciler will match against it.
pub async fn cancel_requirement(
    services: &AppServices,
    date: NaiveDate,
    slot: PresetSlot,
    role: &str,
) -> Result<ShiftId> {
    let role = role.trim();
    let expected = services
        .hours
        .expected_shifts(date)
        .iter()
        .any(|e| e.slot == slot && e.role == role);
    if !expected {
        return Err(RotaError::Validation(format!(
            "no regular {} {} shift on {}",
            slot.label(),
            role,
            date
        )));
    }

    let id = services
        .shifts
        .create(&NewShift {
            date,
            status: ShiftStatus::Cancelled,
            role: Some(role.to_string()),
            time: ShiftTime::Preset(slot),
        })
        .await?;
    info!(shift_id = id, %date, slot = slot.code(), role, "requirement cancelled");
    Ok(id)
}

// --- Event Commands ---

pub async fn add_event(services: &AppServices, event: NewEvent) -> Result<EventId> {
    let id = services.events.create(&event).await?;
    info!(event_id = id, date = %event.date, "event added");
    Ok(id)
}

pub async fn update_event(services: &AppServices, id: EventId, event: NewEvent) -> Result<()> {
    services.events.update(id, &event).await?;
    info!(event_id = id, "event updated");
    Ok(())
}

pub async fn delete_event(services: &AppServices, id: EventId) -> Result<()> {
    services.events.delete(id).await?;
    info!(event_id = id, "event deleted");
    Ok(())
}

// --- Calendar ---

/// Fetch one snapshot of shifts and events for the state's range and build the page.
pub async fn load_calendar(
    services: &AppServices,
    state: &CalendarState,
    today: NaiveDate,
) -> Result<CalendarPage> {
    let range = state.date_range(today);
    debug!(view = ?state.view, start = %range.start, end = %range.end, "loading calendar");

    let (shifts, events) = tokio::try_join!(services.shifts.list(range), services.events.list(range))?;

    Ok(build_calendar_page(state, today, &shifts, &events, &services.hours))
}

/// "Volunteers needed" message for `month` (1-12) of `year`; `None` when nothing is open.
pub async fn month_digest(
    services: &AppServices,
    year: i32,
    month: u32,
    today: NaiveDate,
) -> Result<Option<String>> {
    let first = first_of_month(year, month)
        .ok_or_else(|| RotaError::Validation(format!("no such month {}-{}", year, month)))?;
    let shifts = services.shifts.list(month_range(first)).await?;
    Ok(unfilled_digest(&services.venue_name, year, month, today, &shifts, &services.hours))
}
