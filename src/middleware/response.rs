use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

use super::auth::TOKEN_HEADER;

/// Successful response: a status, an optional JSON body and an optional issued token
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub data: Option<T>,
    pub status_code: StatusCode,
    pub token: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 200 OK with a JSON body
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            status_code: StatusCode::OK,
            token: None,
        }
    }
}

impl ApiResponse<()> {
    /// 200 OK with an empty body
    pub fn ok() -> Self {
        Self {
            data: None,
            status_code: StatusCode::OK,
            token: None,
        }
    }

    /// 202 Accepted with the token in the `Token` header
    pub fn accepted_with_token(token: String) -> Self {
        Self {
            data: None,
            status_code: StatusCode::ACCEPTED,
            token: Some(token),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let mut response = match self.data {
            Some(data) => (self.status_code, Json(data)).into_response(),
            None => self.status_code.into_response(),
        };

        if let Some(token) = self.token {
            match HeaderValue::from_str(&token) {
                Ok(value) => {
                    response.headers_mut().insert(TOKEN_HEADER, value);
                }
                Err(e) => {
                    tracing::error!("Issued token is not a valid header value: {}", e);
                    return StatusCode::INTERNAL_SERVER_ERROR.into_response();
                }
            }
        }

        response
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::ApiError>;
