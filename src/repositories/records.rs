use sqlx::PgPool;

use crate::db::types::Semester;

/// One enrollment of a student, joined to its course, instructor and optional grade.
#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct GradeHistoryRow {
    pub(crate) course_code: String,
    pub(crate) course_name: String,
    pub(crate) credit_hours: f64,
    pub(crate) instructor: Option<String>,
    pub(crate) academic_year: String,
    pub(crate) semester: Semester,
    pub(crate) letter_grade: Option<String>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct AssignedCourseRow {
    pub(crate) offering_id: i64,
    pub(crate) course_code: String,
    pub(crate) course_name: String,
    pub(crate) credit_hours: f64,
    pub(crate) academic_year: String,
    pub(crate) semester: Semester,
    pub(crate) assigned_date: time::Date,
    pub(crate) enrolled_count: i64,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct EnrolledStudentRow {
    pub(crate) student_id_no: String,
    pub(crate) full_name: String,
    pub(crate) email: String,
}

pub(crate) async fn grade_history(
    pool: &PgPool,
    student_id: i64,
) -> Result<Vec<GradeHistoryRow>, sqlx::Error> {
    sqlx::query_as::<_, GradeHistoryRow>(
        "SELECT c.code AS course_code, c.name AS course_name, c.credit_hours, \
                instructor.full_name AS instructor, o.academic_year, o.semester, g.letter_grade \
         FROM enrollments e \
         JOIN course_offerings o ON o.id = e.offering_id \
         JOIN courses c ON c.id = o.course_id \
         LEFT JOIN grades g ON g.enrollment_id = e.id \
         LEFT JOIN LATERAL ( \
             SELECT t.full_name FROM teacher_assignments ta \
             JOIN teachers t ON t.id = ta.teacher_id \
             WHERE ta.offering_id = o.id \
             ORDER BY ta.assigned_date, ta.id \
             LIMIT 1 \
         ) instructor ON TRUE \
         WHERE e.student_id = $1 \
         ORDER BY o.academic_year, o.semester, c.code",
    )
    .bind(student_id)
    .fetch_all(pool)
    .await
}

pub(crate) async fn assigned_courses(
    pool: &PgPool,
    teacher_id: i64,
) -> Result<Vec<AssignedCourseRow>, sqlx::Error> {
    sqlx::query_as::<_, AssignedCourseRow>(
        "SELECT o.id AS offering_id, c.code AS course_code, c.name AS course_name, \
                c.credit_hours, o.academic_year, o.semester, ta.assigned_date, \
                (SELECT COUNT(*) FROM enrollments e WHERE e.offering_id = o.id) AS enrolled_count \
         FROM teacher_assignments ta \
         JOIN course_offerings o ON o.id = ta.offering_id \
         JOIN courses c ON c.id = o.course_id \
         WHERE ta.teacher_id = $1 \
         ORDER BY o.academic_year, o.semester, c.code",
    )
    .bind(teacher_id)
    .fetch_all(pool)
    .await
}

/// Students enrolled in any offering of `course_name` taught by `teacher_id`.
pub(crate) async fn enrolled_students(
    pool: &PgPool,
    teacher_id: i64,
    course_name: &str,
) -> Result<Vec<EnrolledStudentRow>, sqlx::Error> {
    sqlx::query_as::<_, EnrolledStudentRow>(
        "SELECT DISTINCT s.student_id_no, s.full_name, s.email \
         FROM teacher_assignments ta \
         JOIN course_offerings o ON o.id = ta.offering_id \
         JOIN courses c ON c.id = o.course_id \
         JOIN enrollments e ON e.offering_id = o.id \
         JOIN students s ON s.id = e.student_id \
         WHERE ta.teacher_id = $1 AND c.name = $2 \
         ORDER BY s.student_id_no",
    )
    .bind(teacher_id)
    .bind(course_name)
    .fetch_all(pool)
    .await
}
