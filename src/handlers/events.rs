use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use uuid::Uuid;

use crate::models::CreateEventRequest;
use crate::store::{EventStore, JoinOutcome};
use crate::utils::error::AppError;
use crate::utils::response::{message, with_event};

const MSG_NOT_FOUND: &str = "Evento não encontrado.";
const MSG_CAPACITY: &str = "O evento já atingiu o número máximo de participantes.";

/// GET /events — all events, newest first, as a bare JSON array.
pub async fn list_events(State(store): State<EventStore>) -> Result<Response, AppError> {
    let events = store
        .list_all()
        .await
        .map_err(|e| AppError::database("Erro ao obter os eventos.", e))?;

    Ok((StatusCode::OK, Json(events)).into_response())
}

/// POST /events — creates an event, filling placeholder defaults for any
/// missing field. A missing or unreadable body counts as an empty request.
pub async fn create_event(
    State(store): State<EventStore>,
    body: Option<Json<CreateEventRequest>>,
) -> Result<Response, AppError> {
    let request = body.map(|Json(r)| r).unwrap_or_default();

    let event = store
        .insert(request.into_new_event(Utc::now()))
        .await
        .map_err(|e| AppError::database("Erro ao criar o evento.", e))?;

    Ok(with_event(
        StatusCode::CREATED,
        "🌱 Evento criado com sucesso!",
        event,
    ))
}

/// PUT /events/:id/join — registers one participant, bounded by capacity.
pub async fn join_event(
    State(store): State<EventStore>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_event_id(&id)?;

    let outcome = store
        .join(id)
        .await
        .map_err(|e| AppError::database("Erro ao juntar-se ao evento.", e))?;

    match outcome {
        JoinOutcome::Joined(event) => Ok(with_event(
            StatusCode::OK,
            "Inscrição concluída com sucesso!",
            event,
        )),
        JoinOutcome::Full => Err(AppError::CapacityExceeded(MSG_CAPACITY.to_string())),
        JoinOutcome::NotFound => Err(AppError::NotFound(MSG_NOT_FOUND.to_string())),
    }
}

/// DELETE /events/:id — removes an event permanently.
pub async fn delete_event(
    State(store): State<EventStore>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_event_id(&id)?;

    let removed = store
        .delete_by_id(id)
        .await
        .map_err(|e| AppError::database("Erro ao eliminar evento.", e))?;

    if !removed {
        return Err(AppError::NotFound(MSG_NOT_FOUND.to_string()));
    }

    Ok(message(StatusCode::OK, "Evento eliminado com sucesso!"))
}

// Ids are opaque to clients; a segment that is not a UUID can never match a
// stored record, so it reports not-found rather than a parse error.
fn parse_event_id(raw: &str) -> Result<Uuid, AppError> {
    raw.parse::<Uuid>()
        .map_err(|_| AppError::NotFound(MSG_NOT_FOUND.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_id_maps_to_not_found() {
        let err = parse_event_id("not-a-uuid").unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn valid_id_parses() {
        let id = Uuid::new_v4();
        assert_eq!(parse_event_id(&id.to_string()).unwrap(), id);
    }
}
