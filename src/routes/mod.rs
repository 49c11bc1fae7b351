use axum::middleware::from_fn;
use axum::routing::{delete, get, put};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::{create_cors_layer, security_headers};
use crate::handlers::events::{create_event, delete_event, join_event, list_events};
use crate::handlers::health_check;
use crate::store::EventStore;

pub fn create_routes(store: EventStore) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/events", get(list_events).post(create_event))
        .route("/events/:id/join", put(join_event))
        .route("/events/:id", delete(delete_event))
        .layer(from_fn(security_headers))
        .layer(create_cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}
