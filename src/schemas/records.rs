use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::time::{format_date, format_primitive};
use crate::db::types::Semester;
use crate::repositories::records::{AssignedCourseRow, EnrolledStudentRow};
use crate::services::academic_records::{GradeHistory, GradeRecord, GradeSummary, RecordedGrade};
use crate::services::grade_points::LetterGrade;

#[derive(Debug, Serialize)]
pub(crate) struct GradeRecordResponse {
    pub(crate) course_code: String,
    pub(crate) course_name: String,
    pub(crate) credit_hours: f64,
    pub(crate) instructor: Option<String>,
    pub(crate) academic_year: String,
    pub(crate) semester: Semester,
    pub(crate) letter_grade: Option<String>,
    pub(crate) grade_points: f64,
}

impl From<GradeRecord> for GradeRecordResponse {
    fn from(record: GradeRecord) -> Self {
        Self {
            course_code: record.course_code,
            course_name: record.course_name,
            credit_hours: record.credit_hours,
            instructor: record.instructor,
            academic_year: record.academic_year,
            semester: record.semester,
            letter_grade: record.letter_grade,
            grade_points: record.grade_points,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct GradeSummaryResponse {
    pub(crate) attempted_credits: f64,
    pub(crate) graded_credits: f64,
    pub(crate) quality_points: f64,
    pub(crate) gpa: Option<f64>,
}

impl From<GradeSummary> for GradeSummaryResponse {
    fn from(summary: GradeSummary) -> Self {
        Self {
            attempted_credits: summary.attempted_credits,
            graded_credits: summary.graded_credits,
            quality_points: summary.quality_points,
            gpa: summary.gpa,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct GradeHistoryResponse {
    pub(crate) records: Vec<GradeRecordResponse>,
    pub(crate) summary: GradeSummaryResponse,
}

impl From<GradeHistory> for GradeHistoryResponse {
    fn from(history: GradeHistory) -> Self {
        Self {
            records: history.records.into_iter().map(GradeRecordResponse::from).collect(),
            summary: history.summary.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct AssignedCourseResponse {
    pub(crate) offering_id: i64,
    pub(crate) course_code: String,
    pub(crate) course_name: String,
    pub(crate) credit_hours: f64,
    pub(crate) academic_year: String,
    pub(crate) semester: Semester,
    pub(crate) assigned_date: String,
    pub(crate) enrolled_count: i64,
}

impl From<AssignedCourseRow> for AssignedCourseResponse {
    fn from(row: AssignedCourseRow) -> Self {
        Self {
            offering_id: row.offering_id,
            course_code: row.course_code,
            course_name: row.course_name,
            credit_hours: row.credit_hours,
            academic_year: row.academic_year,
            semester: row.semester,
            assigned_date: format_date(row.assigned_date),
            enrolled_count: row.enrolled_count,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct EnrolledStudentResponse {
    pub(crate) student_id_no: String,
    pub(crate) full_name: String,
    pub(crate) email: String,
}

impl From<EnrolledStudentRow> for EnrolledStudentResponse {
    fn from(row: EnrolledStudentRow) -> Self {
        Self { student_id_no: row.student_id_no, full_name: row.full_name, email: row.email }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct GradeWriteRequest {
    #[serde(alias = "studentIdNo")]
    #[validate(length(min = 1, message = "student_id_no must not be empty"))]
    pub(crate) student_id_no: String,
    #[serde(alias = "courseName")]
    #[validate(length(min = 1, message = "course_name must not be empty"))]
    pub(crate) course_name: String,
    #[serde(alias = "letterGrade", alias = "letter")]
    #[validate(length(min = 1, message = "letter_grade must not be empty"))]
    pub(crate) letter_grade: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct RecordedGradeResponse {
    pub(crate) student_id_no: String,
    pub(crate) course_name: String,
    pub(crate) academic_year: String,
    pub(crate) semester: Semester,
    pub(crate) letter_grade: LetterGrade,
    pub(crate) grade_points: f64,
    pub(crate) updated_at: String,
}

impl From<RecordedGrade> for RecordedGradeResponse {
    fn from(grade: RecordedGrade) -> Self {
        Self {
            student_id_no: grade.student_id_no,
            course_name: grade.course_name,
            academic_year: grade.academic_year,
            semester: grade.semester,
            letter_grade: grade.letter,
            grade_points: grade.letter.points(),
            updated_at: format_primitive(grade.updated_at),
        }
    }
}
