// handlers/protected/mod.rs - Protected handlers (token required)
//
// Every route in this tier sits behind `jwt_auth_middleware`, which puts an
// `AuthenticatedCustomer` into the request extensions. Handlers then follow
// the same order: decode and validate the payload, load the target from the
// store (404 if missing), check ownership against the stored owner (401),
// and only then write.

pub mod address;  // GET|POST|PUT|DELETE /customer/address/
pub mod customer; // GET|PUT|DELETE /customer/

use crate::app::AppState;
use crate::database::Customer;
use crate::error::ApiError;

/// Load the customer the token was issued for
pub(crate) async fn load_customer(state: &AppState, id: i64) -> Result<Customer, ApiError> {
    state
        .customers
        .get_customer_by_id(id)
        .await?
        .ok_or(ApiError::MissingCustomer)
}
