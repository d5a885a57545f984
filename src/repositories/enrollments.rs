use sqlx::PgPool;

use crate::db::models::Enrollment;
use crate::db::types::Semester;

const COLUMNS: &str = "id, student_id, offering_id, enrolled_at";

/// An enrollment reached through one of the teacher's own offerings.
#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct ScopedEnrollment {
    pub(crate) enrollment_id: i64,
    pub(crate) student_id_no: String,
    pub(crate) course_name: String,
    pub(crate) academic_year: String,
    pub(crate) semester: Semester,
}

pub(crate) async fn create(
    pool: &PgPool,
    student_id: i64,
    offering_id: i64,
    enrolled_at: time::PrimitiveDateTime,
) -> Result<Enrollment, sqlx::Error> {
    sqlx::query_as::<_, Enrollment>(&format!(
        "INSERT INTO enrollments (student_id, offering_id, enrolled_at)
         VALUES ($1,$2,$3)
         RETURNING {COLUMNS}",
    ))
    .bind(student_id)
    .bind(offering_id)
    .bind(enrolled_at)
    .fetch_one(pool)
    .await
}

/// Locks the student's enrollment in the most recent offering of `course_name`
/// that `teacher_id` is assigned to.
pub(crate) async fn lock_for_teacher(
    executor: impl sqlx::PgExecutor<'_>,
    teacher_id: i64,
    student_id_no: &str,
    course_name: &str,
) -> Result<Option<ScopedEnrollment>, sqlx::Error> {
    sqlx::query_as::<_, ScopedEnrollment>(
        "SELECT e.id AS enrollment_id, s.student_id_no, c.name AS course_name, \
                o.academic_year, o.semester \
         FROM enrollments e \
         JOIN students s ON s.id = e.student_id \
         JOIN course_offerings o ON o.id = e.offering_id \
         JOIN courses c ON c.id = o.course_id \
         JOIN teacher_assignments ta ON ta.offering_id = o.id AND ta.teacher_id = $1 \
         WHERE s.student_id_no = $2 AND c.name = $3 \
         ORDER BY o.academic_year DESC, o.semester DESC \
         LIMIT 1 \
         FOR UPDATE OF e",
    )
    .bind(teacher_id)
    .bind(student_id_no)
    .bind(course_name)
    .fetch_optional(executor)
    .await
}
