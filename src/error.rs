// HTTP API Error Types
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::auth::{AuthError, UnauthorizedAction};
use crate::database::{DatabaseError, Record};
use crate::validation::ValidationError;

/// Every failure a request can end with, mapped to a status code and `{message}` body
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    // 400 Bad Request
    #[error("invalid request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("customer with this email already exists")]
    ExistingUser,

    // 401 Unauthorized
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("invalid user credentials")]
    InvalidCredentials,

    #[error(transparent)]
    UnauthorizedAction(#[from] UnauthorizedAction),

    // 404 Not Found
    #[error("customer doesn't exist")]
    MissingCustomer,

    #[error("address doesn't exist")]
    MissingAddress,

    // 500 Internal Server Error
    #[error("an error occurred while processing your request")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Validation(_) | ApiError::ExistingUser => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Auth(_) | ApiError::InvalidCredentials | ApiError::UnauthorizedAction(_) => {
                StatusCode::UNAUTHORIZED
            }
            ApiError::MissingCustomer | ApiError::MissingAddress => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message; internal details are never included
    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn to_json(&self) -> Value {
        json!({ "message": self.message() })
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            // Row removed between the handler's lookup and its write
            DatabaseError::NotFound { record, id } => {
                tracing::info!("{} {} disappeared before the write", record, id);
                match record {
                    Record::Customer => ApiError::MissingCustomer,
                    Record::Address => ApiError::MissingAddress,
                }
            }
            DatabaseError::Sqlx(sqlx_err) => {
                // Log the real error but return generic message
                tracing::error!("SQLx error: {}", sqlx_err);
                ApiError::Internal(sqlx_err.to_string())
            }
            other => {
                tracing::error!("Store error: {}", other);
                ApiError::Internal(other.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        match &self {
            ApiError::Internal(detail) => tracing::error!("Request failed: {}", detail),
            ApiError::Auth(err) => tracing::warn!("Authentication rejected: {:?}", err),
            other => tracing::debug!("Request rejected with {}: {}", status, other),
        }
        (status, Json(self.to_json())).into_response()
    }
}
