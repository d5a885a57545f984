use sqlx::PgPool;

use crate::db::models::AuthSession;
use crate::db::types::PrincipalKind;

const COLUMNS: &str = "id, principal_kind, principal_id, created_at, expires_at, revoked_at";

pub(crate) struct CreateAuthSession<'a> {
    pub(crate) id: &'a str,
    pub(crate) principal_kind: PrincipalKind,
    pub(crate) principal_id: i64,
    pub(crate) created_at: time::PrimitiveDateTime,
    pub(crate) expires_at: time::PrimitiveDateTime,
}

pub(crate) async fn create(
    pool: &PgPool,
    params: CreateAuthSession<'_>,
) -> Result<AuthSession, sqlx::Error> {
    sqlx::query_as::<_, AuthSession>(&format!(
        "INSERT INTO auth_sessions (id, principal_kind, principal_id, created_at, expires_at)
         VALUES ($1,$2,$3,$4,$5)
         RETURNING {COLUMNS}",
    ))
    .bind(params.id)
    .bind(params.principal_kind)
    .bind(params.principal_id)
    .bind(params.created_at)
    .bind(params.expires_at)
    .fetch_one(pool)
    .await
}

/// Unrevoked and unexpired at `now`.
pub(crate) async fn find_active(
    pool: &PgPool,
    id: &str,
    now: time::PrimitiveDateTime,
) -> Result<Option<AuthSession>, sqlx::Error> {
    sqlx::query_as::<_, AuthSession>(&format!(
        "SELECT {COLUMNS} FROM auth_sessions \
         WHERE id = $1 AND revoked_at IS NULL AND expires_at > $2"
    ))
    .bind(id)
    .bind(now)
    .fetch_optional(pool)
    .await
}

pub(crate) async fn revoke(
    pool: &PgPool,
    id: &str,
    now: time::PrimitiveDateTime,
) -> Result<bool, sqlx::Error> {
    let result =
        sqlx::query("UPDATE auth_sessions SET revoked_at = $2 WHERE id = $1 AND revoked_at IS NULL")
            .bind(id)
            .bind(now)
            .execute(pool)
            .await?;
    Ok(result.rows_affected() > 0)
}

/// Revokes every open session of an account except `keep_id`.
pub(crate) async fn revoke_others(
    executor: impl sqlx::PgExecutor<'_>,
    kind: PrincipalKind,
    principal_id: i64,
    keep_id: &str,
    now: time::PrimitiveDateTime,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE auth_sessions SET revoked_at = $4 \
         WHERE principal_kind = $1 AND principal_id = $2 AND id <> $3 AND revoked_at IS NULL",
    )
    .bind(kind)
    .bind(principal_id)
    .bind(keep_id)
    .bind(now)
    .execute(executor)
    .await?;
    Ok(result.rows_affected())
}
