//! Staff and inventory operations.
//!
//! Reads need only an authenticated identity. Every mutation goes through
//! [`authorize_write`] first, so the club-account policy is enforced in one
//! place for all of them.

use courtside_core::auth::policy::require_club_account;
use courtside_core::models::auth::Identity;
use courtside_core::models::club::{InventoryInput, InventoryItem, StaffInput, StaffMember};
use tracing::info;
use uuid::Uuid;

use crate::AppState;
use crate::error::{AppError, AppResult};

/// Gate shared by every mutating operation.
async fn authorize_write(state: &AppState, identity: &Identity) -> AppResult<()> {
    require_club_account(state.users.as_ref(), identity).await?;
    Ok(())
}

fn required(value: &str, field: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} is required")));
    }
    Ok(())
}

fn validate_staff(input: &StaffInput) -> AppResult<()> {
    required(&input.name, "name")?;
    required(&input.role, "role")
}

fn validate_inventory(input: &InventoryInput) -> AppResult<()> {
    required(&input.name, "name")?;
    required(&input.category, "category")?;
    if input.quantity < 0 {
        return Err(AppError::Validation("quantity must not be negative".into()));
    }
    Ok(())
}

pub async fn list_staff(state: &AppState) -> AppResult<Vec<StaffMember>> {
    Ok(state.club.list_staff().await?)
}

pub async fn create_staff(
    state: &AppState,
    identity: &Identity,
    input: StaffInput,
) -> AppResult<StaffMember> {
    authorize_write(state, identity).await?;
    validate_staff(&input)?;
    let member = state.club.create_staff(input).await?;
    info!(by = %identity.username, staff_id = %member.id, "staff member created");
    Ok(member)
}

pub async fn update_staff(
    state: &AppState,
    identity: &Identity,
    id: Uuid,
    input: StaffInput,
) -> AppResult<StaffMember> {
    authorize_write(state, identity).await?;
    validate_staff(&input)?;
    let member = state
        .club
        .update_staff(id, input)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("staff member {id}")))?;
    info!(by = %identity.username, staff_id = %id, "staff member updated");
    Ok(member)
}

pub async fn delete_staff(state: &AppState, identity: &Identity, id: Uuid) -> AppResult<()> {
    authorize_write(state, identity).await?;
    if !state.club.delete_staff(id).await? {
        return Err(AppError::NotFound(format!("staff member {id}")));
    }
    info!(by = %identity.username, staff_id = %id, "staff member deleted");
    Ok(())
}

pub async fn list_inventory(state: &AppState) -> AppResult<Vec<InventoryItem>> {
    Ok(state.club.list_inventory().await?)
}

pub async fn create_inventory_item(
    state: &AppState,
    identity: &Identity,
    input: InventoryInput,
) -> AppResult<InventoryItem> {
    authorize_write(state, identity).await?;
    validate_inventory(&input)?;
    let item = state.club.create_inventory_item(input).await?;
    info!(by = %identity.username, item_id = %item.id, "inventory item created");
    Ok(item)
}

pub async fn update_inventory_item(
    state: &AppState,
    identity: &Identity,
    id: Uuid,
    input: InventoryInput,
) -> AppResult<InventoryItem> {
    authorize_write(state, identity).await?;
    validate_inventory(&input)?;
    let item = state
        .club
        .update_inventory_item(id, input)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("inventory item {id}")))?;
    info!(by = %identity.username, item_id = %id, "inventory item updated");
    Ok(item)
}

pub async fn delete_inventory_item(
    state: &AppState,
    identity: &Identity,
    id: Uuid,
) -> AppResult<()> {
    authorize_write(state, identity).await?;
    if !state.club.delete_inventory_item(id).await? {
        return Err(AppError::NotFound(format!("inventory item {id}")));
    }
    info!(by = %identity.username, item_id = %id, "inventory item deleted");
    Ok(())
}
