//! Order handlers.
//!
//! - GET /orders - List the caller's orders (credential required)
//! - POST /orders - Create an order
//! - DELETE /orders/{id} - Delete an order
//! - PATCH /orders/{id} - Update an order's status

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use uuid::Uuid;

use crate::{
    error::AppError,
    middleware::auth::ensure_owner,
    models::{
        auth::TokenClaims,
        order::{OrdersQuery, StatusUpdate},
    },
    state::AppState,
    store::{Collection, DeleteResult, Document, Filter, InsertOneResult, UpdateResult},
};

/// List orders for one customer.
///
/// # Authentication
///
/// Requires a valid `token` cookie (checked by middleware) whose email
/// equals the `email` query parameter, otherwise 403.
///
/// # Response
///
/// Array of order documents whose `email` equals the query parameter.
pub async fn list_orders(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
    Query(query): Query<OrdersQuery>,
) -> Result<Json<Vec<Document>>, AppError> {
    ensure_owner(&claims, query.email.as_deref())?;

    let orders = state
        .store
        .find(Collection::Orders, &query.filter(), None)
        .await?;

    Ok(Json(orders))
}

/// Create an order.
///
/// The whole body becomes the stored document; the store assigns `_id`.
///
/// # Response
///
/// ```json
/// { "acknowledged": true, "insertedId": "550e8400-e29b-41d4-a716-446655440000" }
/// ```
pub async fn create_order(
    State(state): State<AppState>,
    Json(order): Json<Document>,
) -> Result<Json<InsertOneResult>, AppError> {
    let result = state.store.insert_one(Collection::Orders, order).await?;

    tracing::info!(order_id = %result.inserted_id, "Order created");

    Ok(Json(result))
}

/// Delete an order. Deleting a missing order reports `deletedCount: 0`.
pub async fn delete_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> Result<Json<DeleteResult>, AppError> {
    let result = state
        .store
        .delete_one(Collection::Orders, &Filter::by_id(order_id))
        .await?;

    Ok(Json(result))
}

/// Replace an order's `status`. Every other body member is ignored.
///
/// # Request Body
///
/// ```json
/// { "status": "confirmed" }
/// ```
pub async fn update_order_status(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
    Json(update): Json<StatusUpdate>,
) -> Result<Json<UpdateResult>, AppError> {
    let result = state
        .store
        .update_one(
            Collection::Orders,
            &Filter::by_id(order_id),
            update.into_set(),
        )
        .await?;

    Ok(Json(result))
}
