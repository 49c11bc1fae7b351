use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use crate::utils::response::message;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    CapacityExceeded(String),

    #[error("{message}")]
    Database {
        message: String,
        #[source]
        source: sqlx::Error,
    },
}

impl AppError {
    /// Wraps a store failure with the generic message shown to the client.
    /// The underlying cause is logged, never exposed.
    pub fn database(message: impl Into<String>, source: sqlx::Error) -> Self {
        AppError::Database {
            message: message.into(),
            source,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::CapacityExceeded(_) => StatusCode::BAD_REQUEST,
            AppError::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn log(&self) {
        match self {
            AppError::NotFound(msg) | AppError::CapacityExceeded(msg) => {
                error!(error = ?self, message = %msg, "Application error");
            }
            AppError::Database { source, .. } => {
                error!(error = ?source, "Database error");
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Log internal details
        self.log();

        // Only the high-level message reaches the client
        let public_message = match &self {
            AppError::NotFound(msg) | AppError::CapacityExceeded(msg) => msg.clone(),
            AppError::Database { message, .. } => message.clone(),
        };

        message(status, public_message)
    }
}
