use crate::db::types::PrincipalKind;

fn table(kind: PrincipalKind) -> &'static str {
    match kind {
        PrincipalKind::Admin => "admins",
        PrincipalKind::Teacher => "teachers",
        PrincipalKind::Student => "students",
    }
}

/// Returns false when no row of `kind` has this id.
pub(crate) async fn update_username(
    executor: impl sqlx::PgExecutor<'_>,
    kind: PrincipalKind,
    id: i64,
    username: &str,
    updated_at: time::PrimitiveDateTime,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(&format!(
        "UPDATE {} SET username = $2, updated_at = $3 WHERE id = $1",
        table(kind)
    ))
    .bind(id)
    .bind(username)
    .bind(updated_at)
    .execute(executor)
    .await?;
    Ok(result.rows_affected() > 0)
}

pub(crate) async fn update_password(
    executor: impl sqlx::PgExecutor<'_>,
    kind: PrincipalKind,
    id: i64,
    hashed_password: &str,
    updated_at: time::PrimitiveDateTime,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(&format!(
        "UPDATE {} SET hashed_password = $2, updated_at = $3 WHERE id = $1",
        table(kind)
    ))
    .bind(id)
    .bind(hashed_password)
    .bind(updated_at)
    .execute(executor)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Usernames are unique per account table.
pub(crate) async fn username_taken(
    executor: impl sqlx::PgExecutor<'_>,
    kind: PrincipalKind,
    username: &str,
    except_id: i64,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(&format!(
        "SELECT EXISTS (SELECT 1 FROM {} WHERE username = $1 AND id <> $2)",
        table(kind)
    ))
    .bind(username)
    .bind(except_id)
    .fetch_one(executor)
    .await
}
