use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::models::Event;

/// Body for responses that only carry a human-readable message.
#[derive(Serialize)]
pub struct MessageBody {
    pub message: String,
}

/// Body for responses that echo the affected event back to the client.
#[derive(Serialize)]
pub struct EventBody {
    pub message: String,
    pub event: Event,
}

pub fn message(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(MessageBody {
            message: message.into(),
        }),
    )
        .into_response()
}

pub fn with_event(status: StatusCode, message: impl Into<String>, event: Event) -> Response {
    (
        status,
        Json(EventBody {
            message: message.into(),
            event,
        }),
    )
        .into_response()
}
