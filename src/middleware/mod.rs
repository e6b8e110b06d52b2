pub mod auth;
pub mod response;

pub use auth::{jwt_auth_middleware, AuthenticatedCustomer, TOKEN_HEADER};
pub use response::{ApiResponse, ApiResult};
