use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::services::academic_records::RecordError;
use crate::services::accounts::AccountError;
use crate::services::authentication::AuthError;

#[derive(Debug, Serialize)]
struct ErrorResponse {
    status: u16,
    detail: String,
}

#[derive(Debug)]
pub(crate) enum ApiError {
    Unauthorized(&'static str),
    Forbidden(&'static str),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    TooManyRequests(&'static str),
    ServiceUnavailable(String),
    Internal(String),
}

impl ApiError {
    /// Log the underlying error with context and return an `Internal` variant.
    pub(crate) fn internal(err: impl std::fmt::Display, context: &str) -> Self {
        tracing::error!(error = %err, "{context}");
        Self::Internal(context.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Unauthorized(message) => {
                let status = StatusCode::UNAUTHORIZED;
                let mut response = (
                    status,
                    Json(ErrorResponse { status: status.as_u16(), detail: message.to_string() }),
                )
                    .into_response();
                response
                    .headers_mut()
                    .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
                response
            }
            ApiError::Forbidden(message) => {
                let status = StatusCode::FORBIDDEN;
                (
                    status,
                    Json(ErrorResponse { status: status.as_u16(), detail: message.to_string() }),
                )
                    .into_response()
            }
            ApiError::BadRequest(message) => {
                let status = StatusCode::BAD_REQUEST;
                (status, Json(ErrorResponse { status: status.as_u16(), detail: message }))
                    .into_response()
            }
            ApiError::NotFound(message) => {
                let status = StatusCode::NOT_FOUND;
                (status, Json(ErrorResponse { status: status.as_u16(), detail: message }))
                    .into_response()
            }
            ApiError::Conflict(message) => {
                let status = StatusCode::CONFLICT;
                (status, Json(ErrorResponse { status: status.as_u16(), detail: message }))
                    .into_response()
            }
            ApiError::TooManyRequests(message) => {
                let status = StatusCode::TOO_MANY_REQUESTS;
                (
                    status,
                    Json(ErrorResponse { status: status.as_u16(), detail: message.to_string() }),
                )
                    .into_response()
            }
            ApiError::ServiceUnavailable(message) => {
                tracing::error!(error = %message, "Service unavailable");
                let status = StatusCode::SERVICE_UNAVAILABLE;
                (status, Json(ErrorResponse { status: status.as_u16(), detail: message }))
                    .into_response()
            }
            ApiError::Internal(message) => {
                tracing::error!(error = %message, "Internal server error");
                let status = StatusCode::INTERNAL_SERVER_ERROR;
                (status, Json(ErrorResponse { status: status.as_u16(), detail: message }))
                    .into_response()
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Validation => {
                ApiError::BadRequest("Identifier and password are required".to_string())
            }
            AuthError::InvalidCredentials => {
                ApiError::Unauthorized("Incorrect identifier or password")
            }
            AuthError::UnknownRole(role) => {
                tracing::warn!(role_id = role.0, "Login matched an admin with an unknown role");
                ApiError::Conflict(format!("Account has an unknown admin role ({})", role.0))
            }
            AuthError::Persistence(err) => ApiError::internal(err, "Failed to look up credentials"),
        }
    }
}

impl From<RecordError> for ApiError {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::Validation(message) => ApiError::BadRequest(message),
            RecordError::EnrollmentNotFound { .. } | RecordError::GradeNotFound { .. } => {
                ApiError::NotFound(err.to_string())
            }
            RecordError::GradeAlreadyRecorded { .. } => ApiError::Conflict(err.to_string()),
            RecordError::Persistence(err) => {
                ApiError::internal(err, "Failed to access academic records")
            }
        }
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::Validation(message) => ApiError::BadRequest(message),
            AccountError::WrongPassword => ApiError::Unauthorized("Current password is incorrect"),
            AccountError::UsernameTaken(_) => ApiError::Conflict(err.to_string()),
            AccountError::Missing => ApiError::NotFound("Account not found".to_string()),
            AccountError::Hashing(err) => ApiError::internal(err, "Failed to hash password"),
            AccountError::Persistence(err) => ApiError::internal(err, "Failed to update account"),
        }
    }
}
