use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Event, NewEvent};

/// Persistence layer for events. Every operation is a single SQL statement,
/// so each one is atomic on its own.
#[derive(Clone)]
pub struct EventStore {
    pool: PgPool,
}

/// Result of a join attempt.
#[derive(Debug)]
pub enum JoinOutcome {
    Joined(Event),
    Full,
    NotFound,
}

impl EventStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All events, newest first.
    pub async fn list_all(&self) -> Result<Vec<Event>, sqlx::Error> {
        sqlx::query_as::<_, Event>("SELECT * FROM events ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>, sqlx::Error> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Inserts a new event. The store assigns the id, a zero participant
    /// count and the creation timestamp.
    pub async fn insert(&self, new_event: NewEvent) -> Result<Event, sqlx::Error> {
        sqlx::query_as::<_, Event>(
            "INSERT INTO events \
             (id, title, description, location, date, image_url, organizer_name, \
              participants, max_participants, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, 0, $8, $9) \
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(new_event.title)
        .bind(new_event.description)
        .bind(new_event.location)
        .bind(new_event.date)
        .bind(new_event.image_url)
        .bind(new_event.organizer_name)
        .bind(new_event.max_participants)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
    }

    /// Increments the participant count if the event still has room. The
    /// capacity check and the increment happen in one conditional UPDATE, so
    /// concurrent joins can never push `participants` past the capacity.
    pub async fn join(&self, id: Uuid) -> Result<JoinOutcome, sqlx::Error> {
        let updated = sqlx::query_as::<_, Event>(
            "UPDATE events SET participants = participants + 1 \
             WHERE id = $1 AND participants < max_participants \
             RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(event) = updated {
            return Ok(JoinOutcome::Joined(event));
        }

        // No row updated: either the event is gone or it is full.
        match self.find_by_id(id).await? {
            Some(_) => Ok(JoinOutcome::Full),
            None => Ok(JoinOutcome::NotFound),
        }
    }

    /// Removes an event. Returns whether a record was actually deleted.
    pub async fn delete_by_id(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
