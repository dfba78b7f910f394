//! Staff and inventory persistence.
//!
//! Rows are keyed by UUIDv7 generated here, so `ORDER BY id` is creation order.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::club::{InventoryInput, InventoryItem, StaffInput, StaffMember};

/// List staff members, oldest first.
pub async fn list_staff(pool: &PgPool) -> Result<Vec<StaffMember>, sqlx::Error> {
    sqlx::query_as::<_, StaffMember>(
        r#"
        SELECT id, name, role, email, phone, created_at, updated_at
        FROM staff_members
        ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Create a staff member.
pub async fn create_staff(pool: &PgPool, input: &StaffInput) -> Result<StaffMember, sqlx::Error> {
    sqlx::query_as::<_, StaffMember>(
        r#"
        INSERT INTO staff_members (id, name, role, email, phone)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, name, role, email, phone, created_at, updated_at
        "#,
    )
    .bind(Uuid::now_v7())
    .bind(&input.name)
    .bind(&input.role)
    .bind(&input.email)
    .bind(&input.phone)
    .fetch_one(pool)
    .await
}

/// Replace a staff member's fields. Returns `None` if the id is unknown.
pub async fn update_staff(
    pool: &PgPool,
    id: Uuid,
    input: &StaffInput,
) -> Result<Option<StaffMember>, sqlx::Error> {
    sqlx::query_as::<_, StaffMember>(
        r#"
        UPDATE staff_members
        SET name = $2, role = $3, email = $4, phone = $5, updated_at = now()
        WHERE id = $1
        RETURNING id, name, role, email, phone, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(&input.name)
    .bind(&input.role)
    .bind(&input.email)
    .bind(&input.phone)
    .fetch_optional(pool)
    .await
}

/// Delete a staff member. Returns whether a row was removed.
pub async fn delete_staff(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM staff_members WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// List inventory items grouped by category.
pub async fn list_inventory(pool: &PgPool) -> Result<Vec<InventoryItem>, sqlx::Error> {
    sqlx::query_as::<_, InventoryItem>(
        r#"
        SELECT id, name, category, quantity, condition, created_at, updated_at
        FROM inventory_items
        ORDER BY category, id
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Create an inventory item.
pub async fn create_inventory_item(
    pool: &PgPool,
    input: &InventoryInput,
) -> Result<InventoryItem, sqlx::Error> {
    sqlx::query_as::<_, InventoryItem>(
        r#"
        INSERT INTO inventory_items (id, name, category, quantity, condition)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, name, category, quantity, condition, created_at, updated_at
        "#,
    )
    .bind(Uuid::now_v7())
    .bind(&input.name)
    .bind(&input.category)
    .bind(input.quantity)
    .bind(&input.condition)
    .fetch_one(pool)
    .await
}

/// Replace an inventory item's fields. Returns `None` if the id is unknown.
pub async fn update_inventory_item(
    pool: &PgPool,
    id: Uuid,
    input: &InventoryInput,
) -> Result<Option<InventoryItem>, sqlx::Error> {
    sqlx::query_as::<_, InventoryItem>(
        r#"
        UPDATE inventory_items
        SET name = $2, category = $3, quantity = $4, condition = $5, updated_at = now()
        WHERE id = $1
        RETURNING id, name, category, quantity, condition, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(&input.name)
    .bind(&input.category)
    .bind(input.quantity)
    .bind(&input.condition)
    .fetch_optional(pool)
    .await
}

/// Delete an inventory item. Returns whether a row was removed.
pub async fn delete_inventory_item(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM inventory_items WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
