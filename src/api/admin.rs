use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use validator::Validate;

use crate::api::errors::ApiError;
use crate::api::guards::{CurrentAdmin, CurrentSuperAdmin};
use crate::api::validation::{
    parse_date, validate_academic_year, validate_password_len, validate_username,
};
use crate::core::security;
use crate::core::state::AppState;
use crate::core::time::primitive_now_utc;
use crate::db::{is_foreign_key_violation, is_unique_violation};
use crate::repositories::{admins, courses, enrollments, offerings, students, teachers};
use crate::schemas::admin::{
    AdminCreate, AssignmentCreate, AssignmentResponse, CourseCreate, CourseResponse,
    EnrollmentCreate, EnrollmentResponse, OfferingCreate, OfferingResponse, StudentCreate,
    TeacherCreate,
};
use crate::schemas::principal::PrincipalResponse;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/teachers", get(list_teachers).post(create_teacher))
        .route("/students", get(list_students).post(create_student))
        .route("/courses", post(create_course))
        .route("/offerings", post(create_offering))
        .route("/offerings/:offering_id/teachers", post(assign_teacher))
        .route("/offerings/:offering_id/enrollments", post(enroll_student))
        .route("/admins", get(list_admins).post(create_admin))
}

async fn list_teachers(
    State(state): State<AppState>,
    CurrentAdmin(_admin): CurrentAdmin,
) -> Result<Json<Vec<PrincipalResponse>>, ApiError> {
    let teachers = teachers::list(state.db())
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list teachers"))?;
    Ok(Json(teachers.into_iter().map(PrincipalResponse::from_teacher).collect()))
}

async fn create_teacher(
    State(state): State<AppState>,
    CurrentAdmin(admin): CurrentAdmin,
    Json(payload): Json<TeacherCreate>,
) -> Result<(StatusCode, Json<PrincipalResponse>), ApiError> {
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let username = validate_username(&payload.username)?;
    validate_password_len(&payload.password)?;

    let hashed_password = security::hash_password(&payload.password)
        .map_err(|e| ApiError::internal(e, "Failed to hash password"))?;

    let teacher = teachers::create(
        state.db(),
        teachers::CreateTeacher {
            username,
            email: payload.email.trim(),
            hashed_password,
            full_name: payload.full_name.trim(),
            department: payload.department.as_deref().map(str::trim).filter(|d| !d.is_empty()),
            created_at: primitive_now_utc(),
        },
    )
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            ApiError::Conflict("Teacher with this username or email already exists".to_string())
        } else {
            ApiError::internal(e, "Failed to create teacher")
        }
    })?;

    tracing::info!(admin_id = admin.id(), teacher_id = teacher.id, "Teacher created");
    Ok((StatusCode::CREATED, Json(PrincipalResponse::from_teacher(teacher))))
}

async fn list_students(
    State(state): State<AppState>,
    CurrentAdmin(_admin): CurrentAdmin,
) -> Result<Json<Vec<PrincipalResponse>>, ApiError> {
    let students = students::list(state.db())
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list students"))?;
    Ok(Json(students.into_iter().map(PrincipalResponse::from_student).collect()))
}

async fn create_student(
    State(state): State<AppState>,
    CurrentAdmin(admin): CurrentAdmin,
    Json(payload): Json<StudentCreate>,
) -> Result<(StatusCode, Json<PrincipalResponse>), ApiError> {
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let username = validate_username(&payload.username)?;
    validate_password_len(&payload.password)?;

    let hashed_password = security::hash_password(&payload.password)
        .map_err(|e| ApiError::internal(e, "Failed to hash password"))?;

    let student = students::create(
        state.db(),
        students::CreateStudent {
            student_id_no: payload.student_id_no.trim(),
            username,
            email: payload.email.trim(),
            hashed_password,
            full_name: payload.full_name.trim(),
            program: payload.program.as_deref().map(str::trim).filter(|p| !p.is_empty()),
            created_at: primitive_now_utc(),
        },
    )
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            ApiError::Conflict(
                "Student with this id number, username or email already exists".to_string(),
            )
        } else {
            ApiError::internal(e, "Failed to create student")
        }
    })?;

    tracing::info!(admin_id = admin.id(), student_id = student.id, "Student created");
    Ok((StatusCode::CREATED, Json(PrincipalResponse::from_student(student))))
}

async fn create_course(
    State(state): State<AppState>,
    CurrentAdmin(_admin): CurrentAdmin,
    Json(payload): Json<CourseCreate>,
) -> Result<(StatusCode, Json<CourseResponse>), ApiError> {
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let course = courses::create(
        state.db(),
        courses::CreateCourse {
            code: payload.code.trim(),
            name: payload.name.trim(),
            credit_hours: payload.credit_hours,
            created_at: primitive_now_utc(),
        },
    )
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            ApiError::Conflict("Course with this code or name already exists".to_string())
        } else {
            ApiError::internal(e, "Failed to create course")
        }
    })?;

    Ok((StatusCode::CREATED, Json(course.into())))
}

async fn create_offering(
    State(state): State<AppState>,
    CurrentAdmin(_admin): CurrentAdmin,
    Json(payload): Json<OfferingCreate>,
) -> Result<(StatusCode, Json<OfferingResponse>), ApiError> {
    let academic_year = payload.academic_year.trim();
    validate_academic_year(academic_year)?;

    courses::find_by_id(state.db(), payload.course_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch course"))?
        .ok_or_else(|| ApiError::NotFound("Course not found".to_string()))?;

    let offering = offerings::create(
        state.db(),
        offerings::CreateOffering {
            course_id: payload.course_id,
            academic_year,
            semester: payload.semester,
            created_at: primitive_now_utc(),
        },
    )
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            ApiError::Conflict("This course is already offered in that semester".to_string())
        } else {
            ApiError::internal(e, "Failed to create offering")
        }
    })?;

    Ok((StatusCode::CREATED, Json(offering.into())))
}

async fn assign_teacher(
    State(state): State<AppState>,
    CurrentAdmin(_admin): CurrentAdmin,
    Path(offering_id): Path<i64>,
    Json(payload): Json<AssignmentCreate>,
) -> Result<(StatusCode, Json<AssignmentResponse>), ApiError> {
    let assigned_date = match payload.assigned_date.as_deref() {
        Some(value) => parse_date(value)?,
        None => primitive_now_utc().date(),
    };

    ensure_offering(&state, offering_id).await?;

    let assignment =
        offerings::assign_teacher(state.db(), offering_id, payload.teacher_id, assigned_date)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    ApiError::Conflict("Teacher is already assigned to this offering".to_string())
                } else if is_foreign_key_violation(&e) {
                    ApiError::NotFound("Teacher not found".to_string())
                } else {
                    ApiError::internal(e, "Failed to assign teacher")
                }
            })?;

    Ok((StatusCode::CREATED, Json(assignment.into())))
}

async fn enroll_student(
    State(state): State<AppState>,
    CurrentAdmin(_admin): CurrentAdmin,
    Path(offering_id): Path<i64>,
    Json(payload): Json<EnrollmentCreate>,
) -> Result<(StatusCode, Json<EnrollmentResponse>), ApiError> {
    ensure_offering(&state, offering_id).await?;

    let enrollment =
        enrollments::create(state.db(), payload.student_id, offering_id, primitive_now_utc())
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    ApiError::Conflict("Student is already enrolled in this offering".to_string())
                } else if is_foreign_key_violation(&e) {
                    ApiError::NotFound("Student not found".to_string())
                } else {
                    ApiError::internal(e, "Failed to enroll student")
                }
            })?;

    Ok((StatusCode::CREATED, Json(enrollment.into())))
}

async fn list_admins(
    State(state): State<AppState>,
    CurrentSuperAdmin(_admin): CurrentSuperAdmin,
) -> Result<Json<Vec<PrincipalResponse>>, ApiError> {
    let admins = admins::list(state.db())
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list admins"))?;
    Ok(Json(admins.into_iter().map(PrincipalResponse::from_admin).collect()))
}

async fn create_admin(
    State(state): State<AppState>,
    CurrentSuperAdmin(creator): CurrentSuperAdmin,
    Json(payload): Json<AdminCreate>,
) -> Result<(StatusCode, Json<PrincipalResponse>), ApiError> {
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let username = validate_username(&payload.username)?;
    validate_password_len(&payload.password)?;

    let hashed_password = security::hash_password(&payload.password)
        .map_err(|e| ApiError::internal(e, "Failed to hash password"))?;

    let admin = admins::create(
        state.db(),
        admins::CreateAdmin {
            username,
            email: payload.email.trim(),
            hashed_password,
            full_name: payload.full_name.trim(),
            role_id: payload.role_id,
            created_at: primitive_now_utc(),
        },
    )
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            ApiError::Conflict("Admin with this username or email already exists".to_string())
        } else {
            ApiError::internal(e, "Failed to create admin")
        }
    })?;

    tracing::info!(
        creator_id = creator.id,
        admin_id = admin.id,
        role_id = admin.role_id,
        "Admin created"
    );
    Ok((StatusCode::CREATED, Json(PrincipalResponse::from_admin(admin))))
}

async fn ensure_offering(state: &AppState, offering_id: i64) -> Result<(), ApiError> {
    offerings::find_by_id(state.db(), offering_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch offering"))?
        .ok_or_else(|| ApiError::NotFound("Offering not found".to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests;
