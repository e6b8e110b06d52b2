// handlers/public/customer.rs - POST /customer/ handler

use axum::extract::{rejection::JsonRejection, State};
use axum::Json;

use crate::api::CreateCustomerRequest;
use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

/// POST /customer/ - Register a customer and return a token for it
///
/// Rejects a payload that fails validation or whose email is already taken.
/// Responds 202 Accepted with the token in the `Token` header.
pub async fn create_customer(
    State(state): State<AppState>,
    payload: Result<Json<CreateCustomerRequest>, JsonRejection>,
) -> ApiResult<()> {
    let Json(request) = payload?;
    state.validator.validate(&request)?;

    if state.customers.get_customer_by_email(&request.email).await?.is_some() {
        return Err(ApiError::ExistingUser);
    }

    let id = state.customers.store_customer(request.into()).await?;
    tracing::info!("Created customer {}", id);

    let token = state
        .issue_token(id)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(ApiResponse::accepted_with_token(token))
}
