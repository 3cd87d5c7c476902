use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers;
use crate::services::DirectoryService;

/// JSON routes, nested under `/doctors` by the API app.
pub fn doctor_routes(service: Arc<DirectoryService>) -> Router {
    Router::new()
        .route("/", get(handlers::list_doctors))
        .route("/suggestions", get(handlers::get_suggestions))
        .route("/specialities", get(handlers::get_specialities))
        .route("/navigate", post(handlers::navigate))
        .route("/{doctor_id}", get(handlers::get_doctor))
        .with_state(service)
}

/// The server-rendered listing page and the health probe.
pub fn page_routes(service: Arc<DirectoryService>) -> Router {
    Router::new()
        .route("/", get(handlers::listing_page))
        .route("/health", get(handlers::health))
        .with_state(service)
}
