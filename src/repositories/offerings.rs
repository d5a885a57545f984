use sqlx::PgPool;

use crate::db::models::{CourseOffering, TeacherAssignment};
use crate::db::types::Semester;

const COLUMNS: &str = "id, course_id, academic_year, semester, created_at";
const ASSIGNMENT_COLUMNS: &str = "id, teacher_id, offering_id, assigned_date";

pub(crate) struct CreateOffering<'a> {
    pub(crate) course_id: i64,
    pub(crate) academic_year: &'a str,
    pub(crate) semester: Semester,
    pub(crate) created_at: time::PrimitiveDateTime,
}

pub(crate) async fn create(
    pool: &PgPool,
    params: CreateOffering<'_>,
) -> Result<CourseOffering, sqlx::Error> {
    sqlx::query_as::<_, CourseOffering>(&format!(
        "INSERT INTO course_offerings (course_id, academic_year, semester, created_at)
         VALUES ($1,$2,$3,$4)
         RETURNING {COLUMNS}",
    ))
    .bind(params.course_id)
    .bind(params.academic_year)
    .bind(params.semester)
    .bind(params.created_at)
    .fetch_one(pool)
    .await
}

pub(crate) async fn find_by_id(
    pool: &PgPool,
    id: i64,
) -> Result<Option<CourseOffering>, sqlx::Error> {
    sqlx::query_as::<_, CourseOffering>(&format!(
        "SELECT {COLUMNS} FROM course_offerings WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub(crate) async fn assign_teacher(
    pool: &PgPool,
    offering_id: i64,
    teacher_id: i64,
    assigned_date: time::Date,
) -> Result<TeacherAssignment, sqlx::Error> {
    sqlx::query_as::<_, TeacherAssignment>(&format!(
        "INSERT INTO teacher_assignments (teacher_id, offering_id, assigned_date)
         VALUES ($1,$2,$3)
         RETURNING {ASSIGNMENT_COLUMNS}",
    ))
    .bind(teacher_id)
    .bind(offering_id)
    .bind(assigned_date)
    .fetch_one(pool)
    .await
}
