// handlers/protected/address.rs - GET|POST|PUT|DELETE /customer/address/

use axum::extract::{
    rejection::{JsonRejection, QueryRejection},
    Query, State,
};
use axum::{Extension, Json};

use super::load_customer;
use crate::api::{
    CreateAddressRequest, DeleteAddressRequest, GetAddressResponse, UpdateAddressRequest,
};
use crate::app::AppState;
use crate::auth::authorize;
use crate::database::Address;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthenticatedCustomer};

/// GET /customer/address/ - Every address owned by the token's customer
pub async fn get_addresses(
    State(state): State<AppState>,
    Extension(subject): Extension<AuthenticatedCustomer>,
) -> ApiResult<Vec<GetAddressResponse>> {
    let customer = load_customer(&state, subject.id).await?;

    let addresses = state.addresses.get_addresses_by_customer_id(customer.id).await?;
    tracing::debug!("Customer {} has {} address(es)", customer.id, addresses.len());

    Ok(ApiResponse::success(
        addresses.into_iter().map(GetAddressResponse::from).collect(),
    ))
}

/// POST /customer/address/ - Add an address owned by the token's customer
pub async fn add_address(
    State(state): State<AppState>,
    Extension(subject): Extension<AuthenticatedCustomer>,
    payload: Result<Json<CreateAddressRequest>, JsonRejection>,
) -> ApiResult<GetAddressResponse> {
    let Json(request) = payload?;
    state.validator.validate(&request)?;

    let customer = load_customer(&state, subject.id).await?;

    let new_address = request.into_new_address(customer.id);
    let id = state.addresses.store_address(new_address.clone()).await?;
    tracing::info!("Customer {} added address {}", customer.id, id);

    Ok(ApiResponse::success(new_address.with_id(id).into()))
}

/// PUT /customer/address/ - Replace one of the token customer's addresses
pub async fn update_address(
    State(state): State<AppState>,
    Extension(subject): Extension<AuthenticatedCustomer>,
    payload: Result<Json<UpdateAddressRequest>, JsonRejection>,
) -> ApiResult<()> {
    let Json(request) = payload?;
    state.validator.validate(&request)?;

    let stored = load_owned_address(&state, subject, request.id).await?;

    state.addresses.update_address(&request.apply_to(&stored)).await?;
    tracing::info!("Customer {} updated address {}", subject.id, stored.id);

    Ok(ApiResponse::ok())
}

/// DELETE /customer/address/?id=N - Remove one of the token customer's addresses
pub async fn delete_address(
    State(state): State<AppState>,
    Extension(subject): Extension<AuthenticatedCustomer>,
    query: Result<Query<DeleteAddressRequest>, QueryRejection>,
) -> ApiResult<()> {
    let Query(request) = query?;
    state.validator.validate(&request)?;

    let stored = load_owned_address(&state, subject, request.id).await?;

    state.addresses.delete_address(stored.id).await?;
    tracing::info!("Customer {} deleted address {}", subject.id, stored.id);

    Ok(ApiResponse::ok())
}

// Customer first, then the address, then ownership against the stored owner.
async fn load_owned_address(
    state: &AppState,
    subject: AuthenticatedCustomer,
    address_id: i64,
) -> Result<Address, ApiError> {
    let customer = load_customer(state, subject.id).await?;

    let address = state
        .addresses
        .get_address_by_id(address_id)
        .await?
        .ok_or(ApiError::MissingAddress)?;

    authorize(customer.id, address.customer_id)?;
    Ok(address)
}
