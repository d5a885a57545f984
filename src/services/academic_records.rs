use sqlx::PgPool;
use thiserror::Error;
use time::PrimitiveDateTime;

use crate::core::time::primitive_now_utc;
use crate::db::is_unique_violation;
use crate::db::types::Semester;
use crate::repositories::enrollments::{self, ScopedEnrollment};
use crate::repositories::grades;
use crate::repositories::records::{self, AssignedCourseRow, EnrolledStudentRow, GradeHistoryRow};
use crate::services::grade_points::{points_for, LetterGrade};

#[derive(Debug, Error)]
pub(crate) enum RecordError {
    #[error("{0}")]
    Validation(String),
    #[error("student {student_id_no} is not enrolled in {course_name} under this teacher")]
    EnrollmentNotFound { student_id_no: String, course_name: String },
    #[error("no grade recorded for student {student_id_no} in {course_name}")]
    GradeNotFound { student_id_no: String, course_name: String },
    #[error("a grade is already recorded for student {student_id_no} in {course_name}")]
    GradeAlreadyRecorded { student_id_no: String, course_name: String },
    #[error("academic record query failed: {0}")]
    Persistence(#[from] sqlx::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct GradeRecord {
    pub(crate) course_code: String,
    pub(crate) course_name: String,
    pub(crate) credit_hours: f64,
    pub(crate) instructor: Option<String>,
    pub(crate) academic_year: String,
    pub(crate) semester: Semester,
    pub(crate) letter_grade: Option<String>,
    pub(crate) grade_points: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct GradeSummary {
    pub(crate) attempted_credits: f64,
    pub(crate) graded_credits: f64,
    pub(crate) quality_points: f64,
    /// `None` until at least one enrollment is graded.
    pub(crate) gpa: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct GradeHistory {
    pub(crate) records: Vec<GradeRecord>,
    pub(crate) summary: GradeSummary,
}

/// A grade write issued by a teacher.
pub(crate) struct GradeWrite<'a> {
    pub(crate) teacher_id: i64,
    pub(crate) student_id_no: &'a str,
    pub(crate) course_name: &'a str,
    pub(crate) letter: &'a str,
}

#[derive(Debug, Clone)]
pub(crate) struct RecordedGrade {
    pub(crate) student_id_no: String,
    pub(crate) course_name: String,
    pub(crate) academic_year: String,
    pub(crate) semester: Semester,
    pub(crate) letter: LetterGrade,
    pub(crate) updated_at: PrimitiveDateTime,
}

/// Sorts rows by (academic year, semester, course code) and derives points and GPA.
pub(crate) fn build_grade_history(mut rows: Vec<GradeHistoryRow>) -> GradeHistory {
    rows.sort_by(|a, b| {
        (a.academic_year.as_str(), a.semester, a.course_code.as_str()).cmp(&(
            b.academic_year.as_str(),
            b.semester,
            b.course_code.as_str(),
        ))
    });

    let mut attempted_credits = 0.0;
    let mut graded_credits = 0.0;
    let mut quality_points = 0.0;

    let records = rows
        .into_iter()
        .map(|row| {
            let grade_points = row.letter_grade.as_deref().map(points_for).unwrap_or(0.0);
            attempted_credits += row.credit_hours;
            if row.letter_grade.is_some() {
                graded_credits += row.credit_hours;
                quality_points += grade_points * row.credit_hours;
            }

            GradeRecord {
                course_code: row.course_code,
                course_name: row.course_name,
                credit_hours: row.credit_hours,
                instructor: row.instructor,
                academic_year: row.academic_year,
                semester: row.semester,
                letter_grade: row.letter_grade,
                grade_points,
            }
        })
        .collect();

    let gpa = (graded_credits > 0.0).then(|| round2(quality_points / graded_credits));

    GradeHistory {
        records,
        summary: GradeSummary {
            attempted_credits,
            graded_credits,
            quality_points: round2(quality_points),
            gpa,
        },
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub(crate) async fn grade_history(
    pool: &PgPool,
    student_id: i64,
) -> Result<GradeHistory, RecordError> {
    let rows = records::grade_history(pool, student_id).await?;
    Ok(build_grade_history(rows))
}

pub(crate) async fn assigned_courses(
    pool: &PgPool,
    teacher_id: i64,
) -> Result<Vec<AssignedCourseRow>, RecordError> {
    Ok(records::assigned_courses(pool, teacher_id).await?)
}

/// Only offerings assigned to `teacher_id` are searched, whatever the course name.
pub(crate) async fn enrolled_students(
    pool: &PgPool,
    teacher_id: i64,
    course_name: &str,
) -> Result<Vec<EnrolledStudentRow>, RecordError> {
    let course_name = course_name.trim();
    if course_name.is_empty() {
        return Err(RecordError::Validation("Course name is required".to_string()));
    }

    Ok(records::enrolled_students(pool, teacher_id, course_name).await?)
}

/// Records the first grade of an enrollment. Fails if one already exists.
pub(crate) async fn add_grade(
    pool: &PgPool,
    write: GradeWrite<'_>,
) -> Result<RecordedGrade, RecordError> {
    let (letter, student_id_no, course_name) = validate_write(&write)?;

    let mut tx = pool.begin().await?;
    let enrollment =
        lock_enrollment(&mut tx, write.teacher_id, student_id_no, course_name).await?;

    if grades::find_by_enrollment(&mut *tx, enrollment.enrollment_id).await?.is_some() {
        return Err(already_recorded(&enrollment));
    }

    let now = primitive_now_utc();
    let grade = match grades::insert(
        &mut *tx,
        enrollment.enrollment_id,
        letter.as_str(),
        write.teacher_id,
        now,
    )
    .await
    {
        Ok(grade) => grade,
        Err(err) if is_unique_violation(&err) => return Err(already_recorded(&enrollment)),
        Err(err) => return Err(err.into()),
    };

    tx.commit().await?;

    Ok(recorded(enrollment, letter, grade.updated_at))
}

/// Replaces the letter of an existing grade. Fails if the enrollment is ungraded.
pub(crate) async fn update_grade(
    pool: &PgPool,
    write: GradeWrite<'_>,
) -> Result<RecordedGrade, RecordError> {
    let (letter, student_id_no, course_name) = validate_write(&write)?;

    let mut tx = pool.begin().await?;
    let enrollment =
        lock_enrollment(&mut tx, write.teacher_id, student_id_no, course_name).await?;

    let now = primitive_now_utc();
    let grade = grades::update_letter(
        &mut *tx,
        enrollment.enrollment_id,
        letter.as_str(),
        write.teacher_id,
        now,
    )
    .await?;

    let Some(grade) = grade else {
        return Err(RecordError::GradeNotFound {
            student_id_no: enrollment.student_id_no,
            course_name: enrollment.course_name,
        });
    };

    tx.commit().await?;

    Ok(recorded(enrollment, letter, grade.updated_at))
}

fn validate_write<'a>(write: &GradeWrite<'a>) -> Result<(LetterGrade, &'a str, &'a str), RecordError> {
    let student_id_no = write.student_id_no.trim();
    let course_name = write.course_name.trim();
    if student_id_no.is_empty() || course_name.is_empty() {
        return Err(RecordError::Validation(
            "Student id number and course name are required".to_string(),
        ));
    }

    let letter = LetterGrade::parse(write.letter).ok_or_else(|| {
        RecordError::Validation(format!("'{}' is not a valid letter grade", write.letter.trim()))
    })?;

    Ok((letter, student_id_no, course_name))
}

async fn lock_enrollment(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    teacher_id: i64,
    student_id_no: &str,
    course_name: &str,
) -> Result<ScopedEnrollment, RecordError> {
    enrollments::lock_for_teacher(&mut **tx, teacher_id, student_id_no, course_name)
        .await?
        .ok_or_else(|| RecordError::EnrollmentNotFound {
            student_id_no: student_id_no.to_string(),
            course_name: course_name.to_string(),
        })
}

fn already_recorded(enrollment: &ScopedEnrollment) -> RecordError {
    RecordError::GradeAlreadyRecorded {
        student_id_no: enrollment.student_id_no.clone(),
        course_name: enrollment.course_name.clone(),
    }
}

fn recorded(
    enrollment: ScopedEnrollment,
    letter: LetterGrade,
    updated_at: PrimitiveDateTime,
) -> RecordedGrade {
    RecordedGrade {
        student_id_no: enrollment.student_id_no,
        course_name: enrollment.course_name,
        academic_year: enrollment.academic_year,
        semester: enrollment.semester,
        letter,
        updated_at,
    }
}
