use sqlx::PgPool;

use crate::db::models::Course;

const COLUMNS: &str = "id, code, name, credit_hours, created_at";

pub(crate) struct CreateCourse<'a> {
    pub(crate) code: &'a str,
    pub(crate) name: &'a str,
    pub(crate) credit_hours: f64,
    pub(crate) created_at: time::PrimitiveDateTime,
}

pub(crate) async fn create(pool: &PgPool, params: CreateCourse<'_>) -> Result<Course, sqlx::Error> {
    sqlx::query_as::<_, Course>(&format!(
        "INSERT INTO courses (code, name, credit_hours, created_at)
         VALUES ($1,$2,$3,$4)
         RETURNING {COLUMNS}",
    ))
    .bind(params.code)
    .bind(params.name)
    .bind(params.credit_hours)
    .bind(params.created_at)
    .fetch_one(pool)
    .await
}

pub(crate) async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(&format!("SELECT {COLUMNS} FROM courses WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}
