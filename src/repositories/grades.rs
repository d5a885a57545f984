use crate::db::models::Grade;

const COLUMNS: &str = "id, enrollment_id, letter_grade, graded_by, created_at, updated_at";

pub(crate) async fn find_by_enrollment(
    executor: impl sqlx::PgExecutor<'_>,
    enrollment_id: i64,
) -> Result<Option<Grade>, sqlx::Error> {
    sqlx::query_as::<_, Grade>(&format!("SELECT {COLUMNS} FROM grades WHERE enrollment_id = $1"))
        .bind(enrollment_id)
        .fetch_optional(executor)
        .await
}

pub(crate) async fn insert(
    executor: impl sqlx::PgExecutor<'_>,
    enrollment_id: i64,
    letter_grade: &str,
    graded_by: i64,
    now: time::PrimitiveDateTime,
) -> Result<Grade, sqlx::Error> {
    sqlx::query_as::<_, Grade>(&format!(
        "INSERT INTO grades (enrollment_id, letter_grade, graded_by, created_at, updated_at)
         VALUES ($1,$2,$3,$4,$4)
         RETURNING {COLUMNS}",
    ))
    .bind(enrollment_id)
    .bind(letter_grade)
    .bind(graded_by)
    .bind(now)
    .fetch_one(executor)
    .await
}

pub(crate) async fn update_letter(
    executor: impl sqlx::PgExecutor<'_>,
    enrollment_id: i64,
    letter_grade: &str,
    graded_by: i64,
    now: time::PrimitiveDateTime,
) -> Result<Option<Grade>, sqlx::Error> {
    sqlx::query_as::<_, Grade>(&format!(
        "UPDATE grades SET letter_grade = $2, graded_by = $3, updated_at = $4
         WHERE enrollment_id = $1
         RETURNING {COLUMNS}",
    ))
    .bind(enrollment_id)
    .bind(letter_grade)
    .bind(graded_by)
    .bind(now)
    .fetch_optional(executor)
    .await
}
