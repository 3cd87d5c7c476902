use std::sync::Arc;

use axum::Router;

use doctor_cell::router::{doctor_routes, page_routes};
use doctor_cell::services::DirectoryService;

pub fn create_router(service: Arc<DirectoryService>) -> Router {
    Router::new()
        .merge(page_routes(service.clone()))
        .nest("/doctors", doctor_routes(service))
}
