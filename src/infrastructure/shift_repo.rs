use chrono::{NaiveDate, NaiveTime};
use sqlx::{FromRow, SqlitePool};
use tracing::{debug, warn};

use crate::domain::date_range::DateRange;
use crate::domain::shift_model::*;
use crate::error::{Result, RotaError};

pub struct ShiftRepository {
    pool: SqlitePool,
}

// =====================
// Row helper
// =====================

#[derive(FromRow)]
struct ShiftRow {
    id: i64,
    date: NaiveDate,
    status: String,
    volunteer_name: Option<String>,
    role: Option<String>,
    shift_type: String,
    // raw text; unreadable times degrade in `From<ShiftRow>`
    custom_start: Option<String>,
    custom_end: Option<String>,
}

fn parse_clock(raw: Option<&str>) -> std::result::Result<Option<NaiveTime>, chrono::ParseError> {
    raw.map(|text| text.trim().parse::<NaiveTime>()).transpose()
}

impl From<ShiftRow> for ShiftRecord {
    fn from(row: ShiftRow) -> Self {
        let status = match (row.status.as_str(), row.volunteer_name) {
            ("filled", Some(name)) => ShiftStatus::Filled(name),
            ("unfilled", _) => ShiftStatus::Unfilled,
            ("cancelled", _) => ShiftStatus::Cancelled,
            // unknown or inconsistent status: fall back on the name
            (other, name) => {
                warn!(shift_id = row.id, status = other, "unexpected shift status, degrading");
                match name {
                    Some(name) if !name.trim().is_empty() => ShiftStatus::Filled(name),
                    _ => ShiftStatus::Unfilled,
                }
            }
        };

        let time = match (
            parse_clock(row.custom_start.as_deref()),
            parse_clock(row.custom_end.as_deref()),
        ) {
            (Ok(start), Ok(end)) => ShiftTime::from_parts(&row.shift_type, start, end),
            _ => ShiftTime::Unrecognised(format!(
                "{}-{}",
                row.custom_start.as_deref().unwrap_or_default(),
                row.custom_end.as_deref().unwrap_or_default()
            )),
        };
        if let ShiftTime::Unrecognised(raw) = &time {
            warn!(shift_id = row.id, shift_type = %raw, "unrecognised shift time");
        }

        ShiftRecord {
            id: row.id,
            date: row.date,
            status,
            role: row.role,
            time,
        }
    }
}

const SELECT_SHIFT: &str = "SELECT id, date, status, volunteer_name, role, shift_type, custom_start, custom_end FROM shifts";

/// Reject writes the store should never hold.
fn validate_new_shift(shift: &NewShift) -> Result<()> {
    if let ShiftTime::Unrecognised(raw) = &shift.time {
        return Err(RotaError::Validation(format!("unknown shift type '{}'", raw)));
    }
    if let ShiftStatus::Filled(name) = &shift.status {
        if name.trim().is_empty() {
            return Err(RotaError::Validation("volunteer name is required".to_string()));
        }
    }
    Ok(())
}

impl ShiftRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Shifts between `range.start` and `range.end` (inclusive), oldest row first within a day.
    pub async fn list(&self, range: DateRange) -> Result<Vec<ShiftRecord>> {
        debug!(start = %range.start, end = %range.end, "listing shifts");
        let rows: Vec<ShiftRow> = sqlx::query_as(&format!(
            "{} WHERE date BETWEEN ?1 AND ?2 ORDER BY date ASC, id ASC",
            SELECT_SHIFT
        ))
        .bind(range.start)
        .bind(range.end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ShiftRecord::from).collect())
    }

    pub async fn get(&self, id: ShiftId) -> Result<Option<ShiftRecord>> {
        let row: Option<ShiftRow> = sqlx::query_as(&format!("{} WHERE id = ?1", SELECT_SHIFT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(ShiftRecord::from))
    }

    pub async fn create(&self, shift: &NewShift) -> Result<ShiftId> {
        let mut ids = self.create_many(shift, 1).await?;
        ids.pop().ok_or_else(|| RotaError::Validation("nothing inserted".to_string()))
    }

    /// Insert `quantity` identical rows in one transaction.
    pub async fn create_many(&self, shift: &NewShift, quantity: usize) -> Result<Vec<ShiftId>> {
        validate_new_shift(shift)?;
        let (shift_type, custom_start, custom_end) = shift.time.to_parts();

        // 1. start transaction
        let mut tx = self.pool.begin().await?;

        // 2. insert rows
        let mut ids = Vec::with_capacity(quantity);
        for _ in 0..quantity {
            let id = sqlx::query(
                "INSERT INTO shifts (
                    date,
                    status,
                    volunteer_name,
                    role,
                    shift_type,
                    custom_start,
                    custom_end
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )
            .bind(shift.date)
            .bind(shift.status.code())
            .bind(shift.status.volunteer_name())
            .bind(shift.role.as_deref())
            .bind(&shift_type)
            .bind(custom_start)
            .bind(custom_end)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();
            ids.push(id);
        }

        // 3. commit
        tx.commit().await?;

        debug!(date = %shift.date, count = ids.len(), "inserted shifts");
        Ok(ids)
    }

    pub async fn update(&self, id: ShiftId, shift: &NewShift) -> Result<()> {
        validate_new_shift(shift)?;
        let (shift_type, custom_start, custom_end) = shift.time.to_parts();

        let affected = sqlx::query(
            "UPDATE shifts SET
                date = ?1,
                status = ?2,
                volunteer_name = ?3,
                role = ?4,
                shift_type = ?5,
                custom_start = ?6,
                custom_end = ?7
             WHERE id = ?8",
        )
        .bind(shift.date)
        .bind(shift.status.code())
        .bind(shift.status.volunteer_name())
        .bind(shift.role.as_deref())
        .bind(&shift_type)
        .bind(custom_start)
        .bind(custom_end)
        .bind(id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if affected == 0 {
            return Err(RotaError::NotFound { entity: "shift", id });
        }
        Ok(())
    }

    pub async fn delete(&self, id: ShiftId) -> Result<()> {
        let affected = sqlx::query("DELETE FROM shifts WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if affected == 0 {
            return Err(RotaError::NotFound { entity: "shift", id });
        }
        Ok(())
    }
}
