use axum::{extract::State, routing::get, Json, Router};

use crate::api::errors::ApiError;
use crate::api::guards::CurrentStudent;
use crate::core::state::AppState;
use crate::schemas::records::GradeHistoryResponse;
use crate::services::academic_records;

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/me/grades", get(my_grades))
}

async fn my_grades(
    State(state): State<AppState>,
    CurrentStudent(student): CurrentStudent,
) -> Result<Json<GradeHistoryResponse>, ApiError> {
    let history = academic_records::grade_history(state.db(), student.id).await?;
    Ok(Json(history.into()))
}
