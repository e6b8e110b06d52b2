use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::app::AppState;
use crate::auth::{self, AuthError, TokenError};
use crate::error::ApiError;

/// Request header carrying the signed token, both inbound and on issuance
pub const TOKEN_HEADER: &str = "token";

/// Authenticated customer context extracted from the token
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthenticatedCustomer {
    pub id: i64,
}

/// Authentication gate shared by every protected route.
///
/// Rejects the request with 401 unless the `Token` header holds a valid,
/// unexpired token with an integer subject. On success the subject is
/// available to handlers as `Extension<AuthenticatedCustomer>`.
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let customer = authenticate(request.headers(), state.secret())?;

    tracing::debug!("Authenticated customer {}", customer.id);
    request.extensions_mut().insert(customer);

    Ok(next.run(request).await)
}

/// Run the gate checks against a header map
pub fn authenticate(headers: &HeaderMap, secret: &[u8]) -> Result<AuthenticatedCustomer, AuthError> {
    let token = extract_token_from_headers(headers)?;
    let id = auth::verify(token, secret)?;
    Ok(AuthenticatedCustomer { id })
}

/// Extract the token string from the `Token` header
fn extract_token_from_headers(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers.get(TOKEN_HEADER).ok_or(AuthError::MissingToken)?;

    value.to_str().map_err(|_| {
        AuthError::InvalidToken(TokenError::Malformed("token header is not valid ASCII".to_string()))
    })
}
