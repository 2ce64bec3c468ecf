//! Service catalogue handlers.
//!
//! Services are read-only:
//! - GET /services - List services, optionally searched and sorted
//! - GET /services/{id} - Get one service

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::{
    error::AppError,
    models::service::ServicesQuery,
    state::AppState,
    store::{Collection, Document, Filter},
};

/// List services.
///
/// # Query Parameters
///
/// - `search` - case-insensitive substring of the title
/// - `sort` - `asc` for ascending price, anything else for descending
///
/// Without `sort`, services come back in insertion order. No pagination.
pub async fn list_services(
    State(state): State<AppState>,
    Query(query): Query<ServicesQuery>,
) -> Result<Json<Vec<Document>>, AppError> {
    let services = state
        .store
        .find(Collection::Services, &query.filter(), query.sort().as_ref())
        .await?;

    Ok(Json(services))
}

/// Get a single service by identifier.
///
/// # Response
///
/// - **200 OK** with the service document
/// - **200 OK** with an empty body when no such service exists
pub async fn get_service(
    State(state): State<AppState>,
    Path(service_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let service = state
        .store
        .find_one(Collection::Services, &Filter::by_id(service_id))
        .await?;

    Ok(match service {
        Some(service) => Json(service).into_response(),
        None => StatusCode::OK.into_response(),
    })
}
