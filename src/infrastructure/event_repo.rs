use chrono::{NaiveDate, NaiveTime};
use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use crate::domain::date_range::DateRange;
use crate::domain::shift_model::{EventId, EventRecord, NewEvent};
use crate::error::{Result, RotaError};

pub struct EventRepository {
    pool: SqlitePool,
}

#[derive(FromRow)]
struct EventRow {
    id: i64,
    title: String,
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
}

impl From<EventRow> for EventRecord {
    fn from(row: EventRow) -> Self {
        EventRecord {
            id: row.id,
            title: row.title,
            date: row.date,
            start_time: row.start_time,
            end_time: row.end_time,
        }
    }
}

fn validate_new_event(event: &NewEvent) -> Result<()> {
    if event.title.trim().is_empty() {
        return Err(RotaError::Validation("event title is required".to_string()));
    }
    Ok(())
}

impl EventRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, range: DateRange) -> Result<Vec<EventRecord>> {
        debug!(start = %range.start, end = %range.end, "listing events");
        let rows: Vec<EventRow> = sqlx::query_as(
            "SELECT id, title, date, start_time, end_time FROM events
             WHERE date BETWEEN ?1 AND ?2
             ORDER BY date ASC, start_time ASC, id ASC",
        )
        .bind(range.start)
        .bind(range.end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(EventRecord::from).collect())
    }

    pub async fn get(&self, id: EventId) -> Result<Option<EventRecord>> {
        let row: Option<EventRow> = sqlx::query_as(
            "SELECT id, title, date, start_time, end_time FROM events WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(EventRecord::from))
    }

    pub async fn create(&self, event: &NewEvent) -> Result<EventId> {
        validate_new_event(event)?;
        let id = sqlx::query(
            "INSERT INTO events (title, date, start_time, end_time) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(event.title.trim())
        .bind(event.date)
        .bind(event.start_time)
        .bind(event.end_time)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();
        Ok(id)
    }

    pub async fn update(&self, id: EventId, event: &NewEvent) -> Result<()> {
        validate_new_event(event)?;
        let affected = sqlx::query(
            "UPDATE events SET title = ?1, date = ?2, start_time = ?3, end_time = ?4 WHERE id = ?5",
        )
        .bind(event.title.trim())
        .bind(event.date)
        .bind(event.start_time)
        .bind(event.end_time)
        .bind(id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if affected == 0 {
            return Err(RotaError::NotFound { entity: "event", id });
        }
        Ok(())
    }

    pub async fn delete(&self, id: EventId) -> Result<()> {
        let affected = sqlx::query("DELETE FROM events WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if affected == 0 {
            return Err(RotaError::NotFound { entity: "event", id });
        }
        Ok(())
    }
}

#[cfg(test)]
mod event_repo_tests {
    use super::*;
    use crate::infrastructure::database::memory_pool;

    fn quiz(date: NaiveDate, start: u32) -> NewEvent {
        NewEvent {
            title: "Quiz Night".to_string(),
            date,
            start_time: NaiveTime::from_hms_opt(start, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(start + 2, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_events_ordered_by_start_time() {
        let repo = EventRepository::new(memory_pool().await.unwrap());
        let date = NaiveDate::from_ymd_opt(2026, 12, 4).unwrap();

        let late = repo.create(&quiz(date, 20)).await.unwrap();
        let early = repo.create(&quiz(date, 18)).await.unwrap();

        let listed = repo.list(DateRange::single(date)).await.unwrap();
        assert_eq!(listed.iter().map(|e| e.id).collect::<Vec<_>>(), vec![early, late]);
        assert_eq!(listed[0].time_label(), "6-8pm");
    }

    #[tokio::test]
    async fn test_update_delete_and_validation() {
        let repo = EventRepository::new(memory_pool().await.unwrap());
        let date = NaiveDate::from_ymd_opt(2026, 12, 5).unwrap();
        let id = repo.create(&quiz(date, 19)).await.unwrap();

        let mut renamed = quiz(date, 19);
        renamed.title = "Open Mic".to_string();
        repo.update(id, &renamed).await.unwrap();
        assert_eq!(repo.get(id).await.unwrap().unwrap().title, "Open Mic");

        renamed.title = "   ".to_string();
        assert!(matches!(repo.update(id, &renamed).await, Err(RotaError::Validation(_))));

        repo.delete(id).await.unwrap();
        assert!(repo.get(id).await.unwrap().is_none());
        assert!(matches!(repo.delete(id).await, Err(RotaError::NotFound { .. })));
    }
}
