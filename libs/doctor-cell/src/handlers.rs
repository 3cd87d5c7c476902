use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, RawQuery, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use tracing::debug;

use shared_models::error::AppError;

use crate::models::{DirectoryState, Doctor, DoctorError, Listing, NavigateRequest, NavigateResponse};
use crate::services::{query, CatalogState, DirectoryService};
use crate::views;

fn decode_raw(raw: Option<String>) -> DirectoryState {
    raw.as_deref().map(query::decode).unwrap_or_default()
}

// ==============================================================================
// JSON HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn list_doctors(
    State(service): State<Arc<DirectoryService>>,
    RawQuery(raw): RawQuery,
) -> Result<Json<Listing>, AppError> {
    let listing = service.listing(decode_raw(raw)).await?;
    debug!("Listing {} doctors ({})", listing.total, listing.status);
    Ok(Json(listing))
}

#[axum::debug_handler]
pub async fn get_suggestions(
    State(service): State<Arc<DirectoryService>>,
    RawQuery(raw): RawQuery,
) -> Result<Json<Value>, AppError> {
    let suggestions = service.suggestions(&decode_raw(raw)).await?;

    Ok(Json(json!({
        "suggestions": suggestions,
        "total": suggestions.len()
    })))
}

#[axum::debug_handler]
pub async fn get_specialities(
    State(service): State<Arc<DirectoryService>>,
    RawQuery(raw): RawQuery,
) -> Result<Json<Value>, AppError> {
    let specialities = service.specialities(&decode_raw(raw)).await?;

    Ok(Json(json!({
        "specialities": specialities,
        "total": specialities.len()
    })))
}

#[axum::debug_handler]
pub async fn get_doctor(
    State(service): State<Arc<DirectoryService>>,
    Path(doctor_id): Path<String>,
) -> Result<Json<Doctor>, AppError> {
    let doctors = service
        .catalog()
        .doctors()
        .await?
        .ok_or_else(|| AppError::Unavailable("Doctors are still loading".to_string()))?;

    doctors
        .iter()
        .find(|d| d.id == doctor_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| DoctorError::NotFound(doctor_id).into())
}

/// Apply one interaction event to the state in `query`; answers with the URL to navigate to.
#[axum::debug_handler]
pub async fn navigate(
    State(service): State<Arc<DirectoryService>>,
    payload: Result<Json<NavigateRequest>, JsonRejection>,
) -> Result<Json<NavigateResponse>, AppError> {
    let Json(request) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let session = service
        .navigate(query::decode(&request.query), request.event)
        .await?;

    Ok(Json(NavigateResponse {
        query: session.query_string(),
        location: session.location(),
    }))
}

// ==============================================================================
// HTML PAGE
// ==============================================================================

pub async fn listing_page(
    State(service): State<Arc<DirectoryService>>,
    RawQuery(raw): RawQuery,
) -> Response {
    let state = decode_raw(raw);

    match service.listing(state.clone()).await {
        Ok(listing) => Html(views::render_listing(&listing)).into_response(),
        Err(e) => {
            let err = AppError::from(e);
            tracing::error!("Listing page unavailable: {}", err);
            (
                err.status_code(),
                Html(views::render_error(&state, err.message())),
            )
                .into_response()
        }
    }
}

pub async fn health(State(service): State<Arc<DirectoryService>>) -> impl IntoResponse {
    let catalog = service.catalog().status().await;
    let status = if catalog.state == CatalogState::Failed {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };

    let label = if status.is_success() { "ok" } else { "degraded" };

    (status, Json(json!({
        "status": label,
        "catalog": catalog
    })))
}
