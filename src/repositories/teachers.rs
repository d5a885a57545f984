use sqlx::PgPool;

use crate::db::models::Teacher;

pub(crate) const COLUMNS: &str =
    "id, username, email, hashed_password, full_name, department, created_at, updated_at";

pub(crate) struct CreateTeacher<'a> {
    pub(crate) username: &'a str,
    pub(crate) email: &'a str,
    pub(crate) hashed_password: String,
    pub(crate) full_name: &'a str,
    pub(crate) department: Option<&'a str>,
    pub(crate) created_at: time::PrimitiveDateTime,
}

pub(crate) async fn find_by_id(
    executor: impl sqlx::PgExecutor<'_>,
    id: i64,
) -> Result<Option<Teacher>, sqlx::Error> {
    sqlx::query_as::<_, Teacher>(&format!("SELECT {COLUMNS} FROM teachers WHERE id = $1"))
        .bind(id)
        .fetch_optional(executor)
        .await
}

pub(crate) async fn find_by_identifier(
    pool: &PgPool,
    identifier: &str,
) -> Result<Option<Teacher>, sqlx::Error> {
    sqlx::query_as::<_, Teacher>(&format!(
        "SELECT {COLUMNS} FROM teachers \
         WHERE username = $1 OR lower(email) = lower($1) \
         ORDER BY id LIMIT 1"
    ))
    .bind(identifier)
    .fetch_optional(pool)
    .await
}

pub(crate) async fn create(
    pool: &PgPool,
    params: CreateTeacher<'_>,
) -> Result<Teacher, sqlx::Error> {
    sqlx::query_as::<_, Teacher>(&format!(
        "INSERT INTO teachers (
            username, email, hashed_password, full_name, department, created_at, updated_at
        ) VALUES ($1,$2,$3,$4,$5,$6,$6)
        RETURNING {COLUMNS}",
    ))
    .bind(params.username)
    .bind(params.email)
    .bind(params.hashed_password)
    .bind(params.full_name)
    .bind(params.department)
    .bind(params.created_at)
    .fetch_one(pool)
    .await
}

pub(crate) async fn list(pool: &PgPool) -> Result<Vec<Teacher>, sqlx::Error> {
    sqlx::query_as::<_, Teacher>(&format!("SELECT {COLUMNS} FROM teachers ORDER BY full_name, id"))
        .fetch_all(pool)
        .await
}
