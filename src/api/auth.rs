use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::guards::{session_principal, CurrentSession};
use crate::core::time::{format_primitive, primitive_now_utc, to_primitive_utc};
use crate::core::{metrics, security, state::AppState};
use crate::repositories::auth_sessions::{self, CreateAuthSession};
use crate::repositories::credentials::PgCredentialStore;
use crate::schemas::auth::{LoginRequest, MeResponse, TokenResponse};
use crate::schemas::principal::PrincipalResponse;
use crate::services::authentication::{self, AuthError};
use crate::services::role_router::destination_for;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
}

async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let identifier = match authentication::validate_credentials(
        &payload.identifier,
        &payload.password,
    ) {
        Ok(identifier) => identifier,
        Err(err) => {
            metrics::record_login("rejected");
            return Err(err.into());
        }
    };

    let limits = state.settings().auth();
    let rate_key = format!("rl:login:{}", identifier.to_lowercase());
    let allowed = state
        .redis()
        .rate_limit(&rate_key, limits.login_rate_limit, limits.login_rate_window_seconds)
        .await
        .unwrap_or(true);
    if !allowed {
        metrics::record_login("throttled");
        return Err(ApiError::TooManyRequests("Too many login attempts, try again later"));
    }

    let store = PgCredentialStore::new(state.db());
    let principal = match authentication::authenticate(
        &store,
        identifier,
        &payload.password,
        payload.account_kind,
    )
    .await
    {
        Ok(principal) => principal,
        Err(err) => {
            let outcome = match &err {
                AuthError::Validation | AuthError::UnknownRole(_) => "rejected",
                AuthError::InvalidCredentials => "invalid",
                AuthError::Persistence(_) => "error",
            };
            metrics::record_login(outcome);
            if matches!(err, AuthError::InvalidCredentials) {
                tracing::info!(identifier = %identifier, "Login failed");
            }
            return Err(err.into());
        }
    };

    let now = OffsetDateTime::now_utc();
    let expires_at = now + security::access_token_lifetime(state.settings());
    let session_id = Uuid::new_v4().to_string();

    auth_sessions::create(
        state.db(),
        CreateAuthSession {
            id: &session_id,
            principal_kind: principal.kind(),
            principal_id: principal.id(),
            created_at: to_primitive_utc(now),
            expires_at: to_primitive_utc(expires_at),
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to create session"))?;

    let token =
        security::create_access_token(&session_id, principal.kind(), expires_at, state.settings())
            .map_err(|e| ApiError::internal(e, "Failed to create access token"))?;

    metrics::record_login("success");
    tracing::info!(
        kind = principal.kind().as_str(),
        role = principal.role_name(),
        principal_id = principal.id(),
        "Login succeeded"
    );

    Ok(Json(TokenResponse {
        access_token: token,
        token_type: "bearer".to_string(),
        expires_at: format_primitive(to_primitive_utc(expires_at)),
        destination: destination_for(&principal),
        principal: PrincipalResponse::from_principal(&principal),
    }))
}

async fn logout(
    State(state): State<AppState>,
    CurrentSession(mut context): CurrentSession,
) -> Result<StatusCode, ApiError> {
    if let Some(session_id) = context.session_id() {
        auth_sessions::revoke(state.db(), session_id, primitive_now_utc())
            .await
            .map_err(|e| ApiError::internal(e, "Failed to revoke session"))?;
    }
    context.clear();

    Ok(StatusCode::NO_CONTENT)
}

async fn me(CurrentSession(context): CurrentSession) -> Result<Json<MeResponse>, ApiError> {
    let principal = session_principal(&context)?;
    Ok(Json(MeResponse {
        destination: destination_for(principal),
        principal: PrincipalResponse::from_principal(principal),
    }))
}
