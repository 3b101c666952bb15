use anyhow::anyhow;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::{
    db::DbPool,
    error::AppError,
    models::trip::{Trip, TripStatus},
};

/// Data access for the `trips` table. Every write validates first; callers
/// distinguish `Validation`, `NotFound` and `Database` error kinds instead of
/// catching by exception class.
#[derive(Clone)]
pub struct TripService {
    db: DbPool,
}

impl TripService {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    /// Inserts a new trip and returns the row re-fetched under its generated
    /// id, so the caller sees exactly what the database stored.
    pub async fn create(&self, trip: &Trip) -> Result<Trip, AppError> {
        validate(trip)?;

        let result = sqlx::query(
            "INSERT INTO trips (origin, destination, departure_time, arrival_time, status) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(&trip.origin)
        .bind(&trip.destination)
        .bind(trip.departure_time)
        .bind(trip.arrival_time)
        .bind(trip.status.as_str())
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::Other(anyhow!("trip insert affected no rows")));
        }

        let id = result.last_insert_rowid();
        if id <= 0 {
            return Err(AppError::Other(anyhow!(
                "no generated id returned for trip insert"
            )));
        }

        self.get_by_id(id)
            .await?
            .ok_or_else(|| AppError::Other(anyhow!("inserted trip id={id} missing on re-read")))
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<Trip>, AppError> {
        let row = sqlx::query(
            "SELECT id, origin, destination, departure_time, arrival_time, status \
             FROM trips WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        row.as_ref().map(map_row).transpose()
    }

    pub async fn list_all(&self) -> Result<Vec<Trip>, AppError> {
        let rows = sqlx::query(
            "SELECT id, origin, destination, departure_time, arrival_time, status \
             FROM trips ORDER BY id",
        )
        .fetch_all(&self.db)
        .await?;

        rows.iter().map(map_row).collect()
    }

    /// Updates an existing trip. `NotFound` when no row carries the id;
    /// otherwise returns the row as re-fetched after the write.
    pub async fn update(&self, trip: &Trip) -> Result<Trip, AppError> {
        if trip.id <= 0 {
            return Err(AppError::Validation(
                "a persisted id is required for update".into(),
            ));
        }

        validate(trip)?;

        let result = sqlx::query(
            "UPDATE trips SET origin = ?1, destination = ?2, departure_time = ?3, \
             arrival_time = ?4, status = ?5 WHERE id = ?6",
        )
        .bind(&trip.origin)
        .bind(&trip.destination)
        .bind(trip.departure_time)
        .bind(trip.arrival_time)
        .bind(trip.status.as_str())
        .bind(trip.id)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }

        self.get_by_id(trip.id).await?.ok_or(AppError::NotFound)
    }

    /// Deletes by id. A missing row is `Ok(false)`, not an error.
    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM trips WHERE id = ?1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Write-time invariants, checked in order; the first violated rule names the
/// failure. Timestamp presence and status membership are enforced by the
/// field types themselves.
pub fn validate(trip: &Trip) -> Result<(), AppError> {
    if trip.origin.trim().is_empty() {
        return Err(AppError::Validation("origin is required".into()));
    }
    if trip.destination.trim().is_empty() {
        return Err(AppError::Validation("destination is required".into()));
    }
    if trip.arrival_time < trip.departure_time {
        return Err(AppError::Validation(
            "arrival_time cannot be before departure_time".into(),
        ));
    }
    Ok(())
}

fn map_row(row: &SqliteRow) -> Result<Trip, AppError> {
    let status_raw: String = row.get("status");
    let status = TripStatus::parse(&status_raw)
        .ok_or_else(|| AppError::Other(anyhow!("unknown trip status {status_raw:?} in database")))?;

    Ok(Trip {
        id: row.get("id"),
        origin: row.get("origin"),
        destination: row.get("destination"),
        departure_time: row.get("departure_time"),
        arrival_time: row.get("arrival_time"),
        status,
    })
}
