use sqlx::PgPool;

use crate::db::models::Admin;

pub(crate) const COLUMNS: &str =
    "id, username, email, hashed_password, full_name, role_id, created_at, updated_at";

pub(crate) struct CreateAdmin<'a> {
    pub(crate) username: &'a str,
    pub(crate) email: &'a str,
    pub(crate) hashed_password: String,
    pub(crate) full_name: &'a str,
    pub(crate) role_id: i32,
    pub(crate) created_at: time::PrimitiveDateTime,
}

pub(crate) async fn find_by_id(
    executor: impl sqlx::PgExecutor<'_>,
    id: i64,
) -> Result<Option<Admin>, sqlx::Error> {
    sqlx::query_as::<_, Admin>(&format!("SELECT {COLUMNS} FROM admins WHERE id = $1"))
        .bind(id)
        .fetch_optional(executor)
        .await
}

/// Matches the username exactly or the email case-insensitively.
pub(crate) async fn find_by_identifier(
    pool: &PgPool,
    identifier: &str,
) -> Result<Option<Admin>, sqlx::Error> {
    sqlx::query_as::<_, Admin>(&format!(
        "SELECT {COLUMNS} FROM admins \
         WHERE username = $1 OR lower(email) = lower($1) \
         ORDER BY id LIMIT 1"
    ))
    .bind(identifier)
    .fetch_optional(pool)
    .await
}

pub(crate) async fn create(pool: &PgPool, params: CreateAdmin<'_>) -> Result<Admin, sqlx::Error> {
    sqlx::query_as::<_, Admin>(&format!(
        "INSERT INTO admins (
            username, email, hashed_password, full_name, role_id, created_at, updated_at
        ) VALUES ($1,$2,$3,$4,$5,$6,$6)
        RETURNING {COLUMNS}",
    ))
    .bind(params.username)
    .bind(params.email)
    .bind(params.hashed_password)
    .bind(params.full_name)
    .bind(params.role_id)
    .bind(params.created_at)
    .fetch_one(pool)
    .await
}

pub(crate) async fn list(pool: &PgPool) -> Result<Vec<Admin>, sqlx::Error> {
    sqlx::query_as::<_, Admin>(&format!("SELECT {COLUMNS} FROM admins ORDER BY id"))
        .fetch_all(pool)
        .await
}

/// Re-applies the configured credentials and super-admin role to an existing account.
pub(crate) async fn reset_superadmin(
    pool: &PgPool,
    id: i64,
    email: &str,
    hashed_password: &str,
    role_id: i32,
    updated_at: time::PrimitiveDateTime,
) -> Result<Admin, sqlx::Error> {
    sqlx::query_as::<_, Admin>(&format!(
        "UPDATE admins SET email = $2, hashed_password = $3, role_id = $4, updated_at = $5 \
         WHERE id = $1 RETURNING {COLUMNS}"
    ))
    .bind(id)
    .bind(email)
    .bind(hashed_password)
    .bind(role_id)
    .bind(updated_at)
    .fetch_one(pool)
    .await
}

pub(crate) async fn find_by_username(
    pool: &PgPool,
    username: &str,
) -> Result<Option<Admin>, sqlx::Error> {
    sqlx::query_as::<_, Admin>(&format!("SELECT {COLUMNS} FROM admins WHERE username = $1"))
        .bind(username)
        .fetch_optional(pool)
        .await
}
