use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use validator::Validate;

use crate::api::errors::ApiError;
use crate::api::guards::CurrentTeacher;
use crate::core::{metrics, state::AppState};
use crate::schemas::records::{
    AssignedCourseResponse, EnrolledStudentResponse, GradeWriteRequest, RecordedGradeResponse,
};
use crate::services::academic_records::{self, GradeWrite};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/me/courses", get(my_courses))
        .route("/me/courses/:course_name/students", get(course_students))
        .route("/me/grades", post(add_grade).put(update_grade))
}

async fn my_courses(
    State(state): State<AppState>,
    CurrentTeacher(teacher): CurrentTeacher,
) -> Result<Json<Vec<AssignedCourseResponse>>, ApiError> {
    let rows = academic_records::assigned_courses(state.db(), teacher.id).await?;
    Ok(Json(rows.into_iter().map(AssignedCourseResponse::from).collect()))
}

async fn course_students(
    State(state): State<AppState>,
    CurrentTeacher(teacher): CurrentTeacher,
    Path(course_name): Path<String>,
) -> Result<Json<Vec<EnrolledStudentResponse>>, ApiError> {
    let rows = academic_records::enrolled_students(state.db(), teacher.id, &course_name).await?;
    Ok(Json(rows.into_iter().map(EnrolledStudentResponse::from).collect()))
}

async fn add_grade(
    State(state): State<AppState>,
    CurrentTeacher(teacher): CurrentTeacher,
    Json(payload): Json<GradeWriteRequest>,
) -> Result<(StatusCode, Json<RecordedGradeResponse>), ApiError> {
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let grade = academic_records::add_grade(state.db(), grade_write(teacher.id, &payload)).await?;

    metrics::record_grade_write("add");
    tracing::info!(
        teacher_id = teacher.id,
        student_id_no = %grade.student_id_no,
        course_name = %grade.course_name,
        letter = grade.letter.as_str(),
        "Grade recorded"
    );
    Ok((StatusCode::CREATED, Json(grade.into())))
}

async fn update_grade(
    State(state): State<AppState>,
    CurrentTeacher(teacher): CurrentTeacher,
    Json(payload): Json<GradeWriteRequest>,
) -> Result<Json<RecordedGradeResponse>, ApiError> {
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let grade =
        academic_records::update_grade(state.db(), grade_write(teacher.id, &payload)).await?;

    metrics::record_grade_write("update");
    tracing::info!(
        teacher_id = teacher.id,
        student_id_no = %grade.student_id_no,
        course_name = %grade.course_name,
        letter = grade.letter.as_str(),
        "Grade updated"
    );
    Ok(Json(grade.into()))
}

fn grade_write(teacher_id: i64, payload: &GradeWriteRequest) -> GradeWrite<'_> {
    GradeWrite {
        teacher_id,
        student_id_no: &payload.student_id_no,
        course_name: &payload.course_name,
        letter: &payload.letter_grade,
    }
}

#[cfg(test)]
mod tests;
