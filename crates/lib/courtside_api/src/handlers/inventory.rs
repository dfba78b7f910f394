//! Inventory request handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use courtside_core::models::club::{InventoryInput, InventoryItem};
use uuid::Uuid;

use crate::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;
use crate::services::club;

/// `GET /api/inventory`
pub async fn list_inventory_handler(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<InventoryItem>>> {
    Ok(Json(club::list_inventory(&state).await?))
}

/// `POST /api/inventory`: club accounts only.
pub async fn create_inventory_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(body): Json<InventoryInput>,
) -> AppResult<(StatusCode, Json<InventoryItem>)> {
    let item = club::create_inventory_item(&state, &user.0, body).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// `PUT /api/inventory/{id}`: club accounts only.
pub async fn update_inventory_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(body): Json<InventoryInput>,
) -> AppResult<Json<InventoryItem>> {
    Ok(Json(
        club::update_inventory_item(&state, &user.0, id, body).await?,
    ))
}

/// `DELETE /api/inventory/{id}`: club accounts only.
pub async fn delete_inventory_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    club::delete_inventory_item(&state, &user.0, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
