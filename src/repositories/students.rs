use sqlx::PgPool;

use crate::db::models::Student;

pub(crate) const COLUMNS: &str = "\
    id, student_id_no, username, email, hashed_password, full_name, program, \
    created_at, updated_at";

pub(crate) struct CreateStudent<'a> {
    pub(crate) student_id_no: &'a str,
    pub(crate) username: &'a str,
    pub(crate) email: &'a str,
    pub(crate) hashed_password: String,
    pub(crate) full_name: &'a str,
    pub(crate) program: Option<&'a str>,
    pub(crate) created_at: time::PrimitiveDateTime,
}

pub(crate) async fn find_by_id(
    executor: impl sqlx::PgExecutor<'_>,
    id: i64,
) -> Result<Option<Student>, sqlx::Error> {
    sqlx::query_as::<_, Student>(&format!("SELECT {COLUMNS} FROM students WHERE id = $1"))
        .bind(id)
        .fetch_optional(executor)
        .await
}

pub(crate) async fn find_by_identifier(
    pool: &PgPool,
    identifier: &str,
) -> Result<Option<Student>, sqlx::Error> {
    sqlx::query_as::<_, Student>(&format!(
        "SELECT {COLUMNS} FROM students \
         WHERE username = $1 OR lower(email) = lower($1) \
         ORDER BY id LIMIT 1"
    ))
    .bind(identifier)
    .fetch_optional(pool)
    .await
}

pub(crate) async fn create(
    pool: &PgPool,
    params: CreateStudent<'_>,
) -> Result<Student, sqlx::Error> {
    sqlx::query_as::<_, Student>(&format!(
        "INSERT INTO students (
            student_id_no, username, email, hashed_password, full_name, program,
            created_at, updated_at
        ) VALUES ($1,$2,$3,$4,$5,$6,$7,$7)
        RETURNING {COLUMNS}",
    ))
    .bind(params.student_id_no)
    .bind(params.username)
    .bind(params.email)
    .bind(params.hashed_password)
    .bind(params.full_name)
    .bind(params.program)
    .bind(params.created_at)
    .fetch_one(pool)
    .await
}

pub(crate) async fn list(pool: &PgPool) -> Result<Vec<Student>, sqlx::Error> {
    sqlx::query_as::<_, Student>(&format!(
        "SELECT {COLUMNS} FROM students ORDER BY student_id_no"
    ))
    .fetch_all(pool)
    .await
}
