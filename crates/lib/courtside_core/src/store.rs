//! Storage traits consumed by the API layer, and their PostgreSQL
//! implementation.
//!
//! Handlers never touch a pool directly. They receive `Arc<dyn UserStore>` /
//! `Arc<dyn ClubStore>` through the application state, so the persistence
//! engine stays an opaque, key-addressed collaborator.

use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::models::auth::{NewUser, User, UserWithPassword};
use crate::models::club::{InventoryInput, InventoryItem, StaffInput, StaffMember};
use crate::{auth, club};

/// Storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint was violated; the message names the field.
    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Db(#[from] sqlx::Error),
}

/// Credential store.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up by username, or by email.
    async fn find_by_login(&self, login: &str) -> Result<Option<UserWithPassword>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// Insert a user. Duplicate usernames or emails yield `StoreError::Conflict`.
    ///
    /// Implementations must flag the user as the club account iff no user
    /// existed before, deciding atomically with the insert.
    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError>;

    /// Returns `false` if the user does not exist.
    async fn set_club_account(&self, id: Uuid, is_club_account: bool) -> Result<bool, StoreError>;
}

/// Shared club records.
#[async_trait]
pub trait ClubStore: Send + Sync {
    async fn list_staff(&self) -> Result<Vec<StaffMember>, StoreError>;
    async fn create_staff(&self, input: StaffInput) -> Result<StaffMember, StoreError>;
    async fn update_staff(
        &self,
        id: Uuid,
        input: StaffInput,
    ) -> Result<Option<StaffMember>, StoreError>;
    async fn delete_staff(&self, id: Uuid) -> Result<bool, StoreError>;

    async fn list_inventory(&self) -> Result<Vec<InventoryItem>, StoreError>;
    async fn create_inventory_item(
        &self,
        input: InventoryInput,
    ) -> Result<InventoryItem, StoreError>;
    async fn update_inventory_item(
        &self,
        id: Uuid,
        input: InventoryInput,
    ) -> Result<Option<InventoryItem>, StoreError>;
    async fn delete_inventory_item(&self, id: Uuid) -> Result<bool, StoreError>;
}

/// PostgreSQL-backed store.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map unique violations on `users` to a field-specific conflict.
fn user_conflict(e: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db) = &e
        && db.is_unique_violation()
    {
        let msg = match db.constraint() {
            Some(c) if c.contains("email") => "Email already registered",
            _ => "Username already taken",
        };
        return StoreError::Conflict(msg.into());
    }
    StoreError::Db(e)
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_by_login(&self, login: &str) -> Result<Option<UserWithPassword>, StoreError> {
        Ok(auth::queries::find_user_by_login(&self.pool, login).await?)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(auth::queries::get_user_by_id(&self.pool, id).await?)
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError> {
        auth::queries::create_user(&self.pool, &new_user)
            .await
            .map_err(user_conflict)
    }

    async fn set_club_account(&self, id: Uuid, is_club_account: bool) -> Result<bool, StoreError> {
        Ok(auth::queries::set_club_account(&self.pool, id, is_club_account).await?)
    }
}

#[async_trait]
impl ClubStore for PgStore {
    async fn list_staff(&self) -> Result<Vec<StaffMember>, StoreError> {
        Ok(club::list_staff(&self.pool).await?)
    }

    async fn create_staff(&self, input: StaffInput) -> Result<StaffMember, StoreError> {
        Ok(club::create_staff(&self.pool, &input).await?)
    }

    async fn update_staff(
        &self,
        id: Uuid,
        input: StaffInput,
    ) -> Result<Option<StaffMember>, StoreError> {
        Ok(club::update_staff(&self.pool, id, &input).await?)
    }

    async fn delete_staff(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(club::delete_staff(&self.pool, id).await?)
    }

    async fn list_inventory(&self) -> Result<Vec<InventoryItem>, StoreError> {
        Ok(club::list_inventory(&self.pool).await?)
    }

    async fn create_inventory_item(
        &self,
        input: InventoryInput,
    ) -> Result<InventoryItem, StoreError> {
        Ok(club::create_inventory_item(&self.pool, &input).await?)
    }

    async fn update_inventory_item(
        &self,
        id: Uuid,
        input: InventoryInput,
    ) -> Result<Option<InventoryItem>, StoreError> {
        Ok(club::update_inventory_item(&self.pool, id, &input).await?)
    }

    async fn delete_inventory_item(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(club::delete_inventory_item(&self.pool, id).await?)
    }
}
