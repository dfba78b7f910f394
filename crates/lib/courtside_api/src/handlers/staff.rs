//! Staff request handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use courtside_core::models::club::{StaffInput, StaffMember};
use uuid::Uuid;

use crate::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;
use crate::services::club;

/// `GET /api/staff`
pub async fn list_staff_handler(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<StaffMember>>> {
    Ok(Json(club::list_staff(&state).await?))
}

/// `POST /api/staff`: club accounts only.
pub async fn create_staff_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(body): Json<StaffInput>,
) -> AppResult<(StatusCode, Json<StaffMember>)> {
    let member = club::create_staff(&state, &user.0, body).await?;
    Ok((StatusCode::CREATED, Json(member)))
}

/// `PUT /api/staff/{id}`: club accounts only.
pub async fn update_staff_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(body): Json<StaffInput>,
) -> AppResult<Json<StaffMember>> {
    Ok(Json(club::update_staff(&state, &user.0, id, body).await?))
}

/// `DELETE /api/staff/{id}`: club accounts only.
pub async fn delete_staff_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    club::delete_staff(&state, &user.0, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
