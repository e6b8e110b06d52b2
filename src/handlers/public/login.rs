// handlers/public/login.rs - POST /customer/login/ handler

use axum::extract::{rejection::JsonRejection, State};
use axum::Json;

use crate::api::LoginCustomerRequest;
use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

/// POST /customer/login/ - Exchange email and password for a token
///
/// An unknown email and a wrong password both answer 401 with the same
/// message. Passwords are compared as stored, in plain text.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginCustomerRequest>, JsonRejection>,
) -> ApiResult<()> {
    let Json(request) = payload?;
    state.validator.validate(&request)?;

    let customer = match state.customers.get_customer_by_email(&request.email).await? {
        Some(customer) => customer,
        None => {
            tracing::info!("Login failed: no customer with the given email");
            return Err(ApiError::InvalidCredentials);
        }
    };

    if customer.password != request.password {
        tracing::info!("Login failed: wrong password for customer {}", customer.id);
        return Err(ApiError::InvalidCredentials);
    }

    let token = state
        .issue_token(customer.id)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    tracing::debug!("Customer {} logged in", customer.id);
    Ok(ApiResponse::accepted_with_token(token))
}
