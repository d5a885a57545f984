use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::time::{format_date, format_primitive};
use crate::db::models::{Course, CourseOffering, Enrollment, TeacherAssignment};
use crate::db::types::{Semester, ADMIN_ROLE_ID};

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct TeacherCreate {
    #[validate(length(min = 1, max = 64, message = "username must be 1-64 characters"))]
    pub(crate) username: String,
    #[validate(email(message = "email must be a valid address"))]
    pub(crate) email: String,
    pub(crate) password: String,
    #[serde(alias = "fullName")]
    #[validate(length(min = 1, message = "full_name must not be empty"))]
    pub(crate) full_name: String,
    #[serde(default)]
    pub(crate) department: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct StudentCreate {
    #[serde(alias = "studentIdNo")]
    #[validate(length(min = 1, max = 32, message = "student_id_no must be 1-32 characters"))]
    pub(crate) student_id_no: String,
    #[validate(length(min = 1, max = 64, message = "username must be 1-64 characters"))]
    pub(crate) username: String,
    #[validate(email(message = "email must be a valid address"))]
    pub(crate) email: String,
    pub(crate) password: String,
    #[serde(alias = "fullName")]
    #[validate(length(min = 1, message = "full_name must not be empty"))]
    pub(crate) full_name: String,
    #[serde(default)]
    pub(crate) program: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct AdminCreate {
    #[validate(length(min = 1, max = 64, message = "username must be 1-64 characters"))]
    pub(crate) username: String,
    #[validate(email(message = "email must be a valid address"))]
    pub(crate) email: String,
    pub(crate) password: String,
    #[serde(alias = "fullName")]
    #[validate(length(min = 1, message = "full_name must not be empty"))]
    pub(crate) full_name: String,
    #[serde(default = "default_admin_role", alias = "roleId")]
    #[validate(range(min = 1, max = 2, message = "role_id must be 1 (super admin) or 2 (admin)"))]
    pub(crate) role_id: i32,
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct CourseCreate {
    #[validate(length(min = 1, max = 32, message = "code must be 1-32 characters"))]
    pub(crate) code: String,
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub(crate) name: String,
    #[serde(alias = "creditHours")]
    #[validate(range(exclusive_min = 0.0, message = "credit_hours must be positive"))]
    pub(crate) credit_hours: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OfferingCreate {
    #[serde(alias = "courseId")]
    pub(crate) course_id: i64,
    #[serde(alias = "academicYear")]
    pub(crate) academic_year: String,
    pub(crate) semester: Semester,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AssignmentCreate {
    #[serde(alias = "teacherId")]
    pub(crate) teacher_id: i64,
    /// `YYYY-MM-DD`; defaults to today.
    #[serde(default, alias = "assignedDate")]
    pub(crate) assigned_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EnrollmentCreate {
    #[serde(alias = "studentId")]
    pub(crate) student_id: i64,
}

#[derive(Debug, Serialize)]
pub(crate) struct CourseResponse {
    pub(crate) id: i64,
    pub(crate) code: String,
    pub(crate) name: String,
    pub(crate) credit_hours: f64,
    pub(crate) created_at: String,
}

impl From<Course> for CourseResponse {
    fn from(course: Course) -> Self {
        Self {
            id: course.id,
            code: course.code,
            name: course.name,
            credit_hours: course.credit_hours,
            created_at: format_primitive(course.created_at),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct OfferingResponse {
    pub(crate) id: i64,
    pub(crate) course_id: i64,
    pub(crate) academic_year: String,
    pub(crate) semester: Semester,
    pub(crate) created_at: String,
}

impl From<CourseOffering> for OfferingResponse {
    fn from(offering: CourseOffering) -> Self {
        Self {
            id: offering.id,
            course_id: offering.course_id,
            academic_year: offering.academic_year,
            semester: offering.semester,
            created_at: format_primitive(offering.created_at),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct AssignmentResponse {
    pub(crate) id: i64,
    pub(crate) teacher_id: i64,
    pub(crate) offering_id: i64,
    pub(crate) assigned_date: String,
}

impl From<TeacherAssignment> for AssignmentResponse {
    fn from(assignment: TeacherAssignment) -> Self {
        Self {
            id: assignment.id,
            teacher_id: assignment.teacher_id,
            offering_id: assignment.offering_id,
            assigned_date: format_date(assignment.assigned_date),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct EnrollmentResponse {
    pub(crate) id: i64,
    pub(crate) student_id: i64,
    pub(crate) offering_id: i64,
    pub(crate) enrolled_at: String,
}

impl From<Enrollment> for EnrollmentResponse {
    fn from(enrollment: Enrollment) -> Self {
        Self {
            id: enrollment.id,
            student_id: enrollment.student_id,
            offering_id: enrollment.offering_id,
            enrolled_at: format_primitive(enrollment.enrolled_at),
        }
    }
}

fn default_admin_role() -> i32 {
    ADMIN_ROLE_ID
}
