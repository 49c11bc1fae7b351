use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Placeholder values substituted when a create request omits a field.
pub const DEFAULT_TITLE: &str = "Plantação Comunitária 🌳";
pub const DEFAULT_DESCRIPTION: &str = "Um novo evento de plantação foi criado!";
pub const DEFAULT_LOCATION: &str = "Lisboa, Parque Verde";
pub const DEFAULT_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1542601906990-b4d3fb778b09";

/// Every event is organized by the platform itself until accounts exist.
/// Forced server-side on creation; client-supplied values are discarded.
pub const ORGANIZER_NAME: &str = "Verde Lab";

/// Capacity applied to every new event. No creation path lets the client
/// choose it.
pub const DEFAULT_MAX_PARTICIPANTS: i32 = 20;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub date: DateTime<Utc>,
    pub image_url: String,
    pub organizer_name: String,
    pub participants: i32,
    pub max_participants: i32,
    pub created_at: DateTime<Utc>,
}

/// Body of POST /events. Every field is optional; unknown fields
/// (including `organizerName` and `participants`) are ignored.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// A fully defaulted event ready for insertion. The store assigns `id`,
/// `participants` and `created_at`.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub location: String,
    pub date: DateTime<Utc>,
    pub image_url: String,
    pub organizer_name: String,
    pub max_participants: i32,
}

impl CreateEventRequest {
    /// Applies the placeholder defaults and the server-side organizer
    /// override. A missing field, a JSON null, and a blank string are all
    /// treated the same way, matching the behavior the front-end relies on.
    pub fn into_new_event(self, now: DateTime<Utc>) -> NewEvent {
        NewEvent {
            title: or_placeholder(self.title, DEFAULT_TITLE),
            description: or_placeholder(self.description, DEFAULT_DESCRIPTION),
            location: or_placeholder(self.location, DEFAULT_LOCATION),
            date: self.date.unwrap_or(now),
            image_url: or_placeholder(self.image_url, DEFAULT_IMAGE_URL),
            organizer_name: ORGANIZER_NAME.to_string(),
            max_participants: DEFAULT_MAX_PARTICIPANTS,
        }
    }
}

fn or_placeholder(value: Option<String>, placeholder: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => placeholder.to_string(),
    }
}
