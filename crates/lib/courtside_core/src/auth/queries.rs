//! Auth-related database queries.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::auth::{NewUser, User, UserWithPassword};

/// Row shape for lookups that also need the password hash.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    #[sqlx(flatten)]
    user: User,
    password_hash: Option<String>,
}

const USER_COLUMNS: &str = "id, username, email, full_name, is_club_account, created_at";

/// Fetch a user by username or (case-insensitive) email, including the hash.
pub async fn find_user_by_login(
    pool: &PgPool,
    login: &str,
) -> Result<Option<UserWithPassword>, sqlx::Error> {
    let row = sqlx::query_as::<_, UserRow>(&format!(
        "SELECT {USER_COLUMNS}, password_hash FROM users \
         WHERE username = $1 OR email = lower($1) \
         LIMIT 1"
    ))
    .bind(login)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(|r| UserWithPassword {
        user: r.user,
        password_hash: r.password_hash,
    }))
}

/// Fetch a user by ID.
pub async fn get_user_by_id(pool: &PgPool, user_id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

/// Advisory lock key that serialises the first-user decision across
/// concurrent registrations.
const FIRST_USER_LOCK: i64 = 0x636f_7572_7473;

/// Create a new user. Unique violations surface as `sqlx::Error::Database`.
///
/// The club-account flag is set iff the table is empty, decided under a
/// transaction-scoped advisory lock so two concurrent first registrations
/// cannot both see an empty table.
pub async fn create_user(pool: &PgPool, new_user: &NewUser) -> Result<User, sqlx::Error> {
    let mut tx = pool.begin().await?;
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(FIRST_USER_LOCK)
        .execute(&mut *tx)
        .await?;
    let user = sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (username, email, password_hash, full_name, is_club_account) \
         SELECT $1, lower($2), $3, $4, NOT EXISTS (SELECT 1 FROM users) \
         RETURNING {USER_COLUMNS}"
    ))
    .bind(&new_user.username)
    .bind(&new_user.email)
    .bind(&new_user.password_hash)
    .bind(&new_user.full_name)
    .fetch_one(&mut *tx)
    .await?;
    tx.commit().await?;
    Ok(user)
}

/// Set or clear the club-account flag.
pub async fn set_club_account(
    pool: &PgPool,
    user_id: Uuid,
    is_club_account: bool,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE users SET is_club_account = $2 WHERE id = $1")
        .bind(user_id)
        .bind(is_club_account)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
