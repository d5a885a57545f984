use axum::{extract::State, http::StatusCode, routing::patch, Json, Router};

use crate::api::errors::ApiError;
use crate::api::guards::{session_principal, CurrentSession};
use crate::core::state::AppState;
use crate::schemas::account::{ChangePasswordRequest, ChangeUsernameRequest};
use crate::schemas::principal::PrincipalResponse;
use crate::services::accounts::{self, PasswordChange};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/username", patch(change_username))
        .route("/password", patch(change_password))
}

async fn change_username(
    State(state): State<AppState>,
    CurrentSession(mut context): CurrentSession,
    Json(payload): Json<ChangeUsernameRequest>,
) -> Result<Json<PrincipalResponse>, ApiError> {
    let principal = session_principal(&context)?.clone();
    let updated = accounts::change_username(state.db(), &principal, &payload.username).await?;

    if !context.replace_principal(updated) {
        return Err(ApiError::internal(
            "reloaded account differs from session principal",
            "Failed to refresh session",
        ));
    }

    let current = session_principal(&context)?;
    tracing::info!(
        kind = current.kind().as_str(),
        principal_id = current.id(),
        username = %current.username(),
        "Username changed"
    );
    Ok(Json(PrincipalResponse::from_principal(current)))
}

async fn change_password(
    State(state): State<AppState>,
    CurrentSession(context): CurrentSession,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<StatusCode, ApiError> {
    let principal = session_principal(&context)?;
    let session_id = context.session_id().unwrap_or_default();

    accounts::change_password(
        state.db(),
        principal,
        session_id,
        PasswordChange {
            current: &payload.current_password,
            new: &payload.new_password,
            confirm: &payload.confirm_password,
        },
    )
    .await?;

    Ok(StatusCode::NO_CONTENT)
}
