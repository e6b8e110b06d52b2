// handlers/protected/customer.rs - GET|PUT|DELETE /customer/

use axum::extract::{rejection::JsonRejection, State};
use axum::{Extension, Json};

use super::load_customer;
use crate::api::{GetCustomerResponse, UpdateCustomerRequest};
use crate::app::AppState;
use crate::auth::authorize;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthenticatedCustomer};

/// GET /customer/ - Profile of the token's customer
pub async fn get_customer(
    State(state): State<AppState>,
    Extension(subject): Extension<AuthenticatedCustomer>,
) -> ApiResult<GetCustomerResponse> {
    let customer = load_customer(&state, subject.id).await?;
    authorize(subject.id, customer.id)?;

    Ok(ApiResponse::success(customer.into()))
}

/// PUT /customer/ - Replace the token customer's profile
///
/// The email may stay the same but cannot move onto another customer's.
pub async fn update_customer(
    State(state): State<AppState>,
    Extension(subject): Extension<AuthenticatedCustomer>,
    payload: Result<Json<UpdateCustomerRequest>, JsonRejection>,
) -> ApiResult<()> {
    let Json(request) = payload?;
    state.validator.validate(&request)?;

    let customer = load_customer(&state, subject.id).await?;
    authorize(subject.id, customer.id)?;

    if let Some(other) = state.customers.get_customer_by_email(&request.email).await? {
        if other.id != customer.id {
            return Err(ApiError::ExistingUser);
        }
    }

    state
        .customers
        .update_customer(&request.into_customer(customer.id))
        .await?;
    tracing::info!("Updated customer {}", customer.id);

    Ok(ApiResponse::ok())
}

/// DELETE /customer/ - Remove the token's customer along with its addresses
pub async fn delete_customer(
    State(state): State<AppState>,
    Extension(subject): Extension<AuthenticatedCustomer>,
) -> ApiResult<()> {
    let customer = load_customer(&state, subject.id).await?;
    authorize(subject.id, customer.id)?;

    let removed = state.customers.delete_customer_cascade(customer.id).await?;

    tracing::info!("Deleted customer {} and {} address(es)", customer.id, removed);
    Ok(ApiResponse::ok())
}
