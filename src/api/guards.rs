use async_trait::async_trait;
use axum::extract::{FromRequestParts, State};
use axum::http::{header, request::Parts};

use crate::api::errors::ApiError;
use crate::core::principal::Principal;
use crate::core::session::SessionContext;
use crate::core::time::primitive_now_utc;
use crate::core::{security, state::AppState};
use crate::db::models::{Admin, Student, Teacher};
use crate::db::types::PrincipalKind;
use crate::repositories::{auth_sessions, credentials};

/// Request-scoped session rebuilt from the bearer token and its `auth_sessions` row.
pub(crate) struct CurrentSession(pub(crate) SessionContext);
pub(crate) struct CurrentTeacher(pub(crate) Teacher);
pub(crate) struct CurrentStudent(pub(crate) Student);
/// Super admins and regular admins.
pub(crate) struct CurrentAdmin(pub(crate) Principal);
pub(crate) struct CurrentSuperAdmin(pub(crate) Admin);

const INVALID_CREDENTIALS: &str = "Invalid authentication credentials";

#[async_trait]
impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let State(app_state) = State::<AppState>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to access application state"))?;

        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(ApiError::Unauthorized(INVALID_CREDENTIALS))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(ApiError::Unauthorized(INVALID_CREDENTIALS))?;

        let claims = security::verify_token(token, app_state.settings())
            .map_err(|_| ApiError::Unauthorized(INVALID_CREDENTIALS))?;

        let session = auth_sessions::find_active(app_state.db(), &claims.sub, primitive_now_utc())
            .await
            .map_err(|e| ApiError::internal(e, "Failed to load session"))?
            .ok_or(ApiError::Unauthorized("Session expired or revoked"))?;

        if session.principal_kind != claims.kind {
            return Err(ApiError::Unauthorized(INVALID_CREDENTIALS));
        }

        let account =
            credentials::find_by_id(app_state.db(), session.principal_kind, session.principal_id)
                .await
                .map_err(|e| ApiError::internal(e, "Failed to load account"))?
                .ok_or(ApiError::Unauthorized("Account not found"))?;

        let principal = account.into_principal().map_err(|err| {
            tracing::warn!(
                role_id = err.0,
                session_id = %session.id,
                "Session account has an unknown role"
            );
            ApiError::Forbidden("Account role is not recognized")
        })?;

        Ok(CurrentSession(SessionContext::authenticated(session.id, principal)))
    }
}

/// The principal held by an extracted session.
pub(crate) fn session_principal(context: &SessionContext) -> Result<&Principal, ApiError> {
    context.current().ok_or(ApiError::Unauthorized(INVALID_CREDENTIALS))
}

/// The session principal, provided it is of `kind`; `denied` otherwise.
async fn principal_of_kind(
    parts: &mut Parts,
    state: &AppState,
    kind: PrincipalKind,
    denied: &'static str,
) -> Result<Principal, ApiError> {
    let CurrentSession(context) = CurrentSession::from_request_parts(parts, state).await?;
    if context.current_identifier(kind).is_none() {
        return Err(ApiError::Forbidden(denied));
    }
    session_principal(&context).cloned()
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentTeacher {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        const DENIED: &str = "Teacher access required";
        match principal_of_kind(parts, state, PrincipalKind::Teacher, DENIED).await? {
            Principal::Teacher(teacher) => Ok(CurrentTeacher(teacher)),
            _ => Err(ApiError::Forbidden(DENIED)),
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentStudent {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        const DENIED: &str = "Student access required";
        match principal_of_kind(parts, state, PrincipalKind::Student, DENIED).await? {
            Principal::Student(student) => Ok(CurrentStudent(student)),
            _ => Err(ApiError::Forbidden(DENIED)),
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        principal_of_kind(parts, state, PrincipalKind::Admin, "Admin access required")
            .await
            .map(CurrentAdmin)
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentSuperAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        const DENIED: &str = "Super admin access required";
        match principal_of_kind(parts, state, PrincipalKind::Admin, DENIED).await? {
            Principal::SuperAdmin(admin) => Ok(CurrentSuperAdmin(admin)),
            _ => Err(ApiError::Forbidden(DENIED)),
        }
    }
}
