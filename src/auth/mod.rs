use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod ownership;

pub use ownership::{authorize, UnauthorizedAction};

/// The only algorithm tokens are signed with and the only one accepted on verify.
pub const ALGORITHM: Algorithm = Algorithm::HS256;

/// Registered JWT claims carried by every customer token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Customer id as a decimal string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Expiry as unix seconds
    pub exp: i64,
}

impl Claims {
    pub fn new(subject: i64, expires_at: DateTime<Utc>) -> Self {
        Self {
            sub: Some(subject.to_string()),
            exp: expires_at.timestamp(),
        }
    }
}

/// Why a token string failed to decode. Kept for logs; callers only see `InvalidToken`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("malformed token: {0}")]
    Malformed(String),

    #[error("signature verification failed")]
    BadSignature,

    #[error("unexpected signing algorithm")]
    WrongAlgorithm,

    #[error("token has expired")]
    Expired,

    #[error("failed to sign token: {0}")]
    Signing(String),

    #[error("token lifetime is out of range")]
    LifetimeOutOfRange,
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::InvalidSignature => TokenError::BadSignature,
            ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => TokenError::WrongAlgorithm,
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Malformed(err.to_string()),
        }
    }
}

/// Authentication failures. All four surface as 401 Unauthorized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("missing token")]
    MissingToken,

    #[error("invalid token: {0}")]
    InvalidToken(#[from] TokenError),

    #[error("missing subject in token")]
    MissingSubject,

    #[error("token subject is not an integer")]
    NonIntegerSubject,
}

/// Expiry for a token issued now that lives for `lifetime`
pub fn expires_in(lifetime: Duration) -> Result<DateTime<Utc>, TokenError> {
    Utc::now()
        .checked_add_signed(lifetime)
        .ok_or(TokenError::LifetimeOutOfRange)
}

/// Expiry `hours` from now, rejecting counts chrono cannot represent
pub fn expires_in_hours(hours: i64) -> Result<DateTime<Utc>, TokenError> {
    Duration::try_hours(hours)
        .ok_or(TokenError::LifetimeOutOfRange)
        .and_then(expires_in)
}

/// Sign an identity claim for `subject` that is valid until `expires_at`.
pub fn issue(secret: &[u8], subject: i64, expires_at: DateTime<Utc>) -> Result<String, TokenError> {
    encode_claims(secret, &Claims::new(subject, expires_at))
}

/// Sign arbitrary claims with the service algorithm.
pub fn encode_claims(secret: &[u8], claims: &Claims) -> Result<String, TokenError> {
    let header = Header::new(ALGORITHM);
    let encoding_key = EncodingKey::from_secret(secret);

    encode(&header, claims, &encoding_key).map_err(|e| TokenError::Signing(e.to_string()))
}

/// Check signature, algorithm and expiry, and return the raw claims.
///
/// A token whose `exp` equals the current second is already expired.
pub fn decode_claims(token: &str, secret: &[u8]) -> Result<Claims, TokenError> {
    let decoding_key = DecodingKey::from_secret(secret);

    let mut validation = Validation::new(ALGORITHM);
    validation.leeway = 0;
    // jsonwebtoken accepts exp == now; expiry is checked below instead
    validation.validate_exp = false;
    validation.set_required_spec_claims(&["exp"]);

    let token_data = decode::<Claims>(token, &decoding_key, &validation)?;

    if token_data.claims.exp <= Utc::now().timestamp() {
        return Err(TokenError::Expired);
    }

    Ok(token_data.claims)
}

/// Extract the customer id from verified claims.
pub fn subject_from_claims(claims: &Claims) -> Result<i64, AuthError> {
    let subject = match claims.sub.as_deref() {
        Some(s) if !s.is_empty() => s,
        _ => return Err(AuthError::MissingSubject),
    };

    subject.parse::<i64>().map_err(|_| AuthError::NonIntegerSubject)
}

/// Verify a token and return the customer id it was issued for.
pub fn verify(token: &str, secret: &[u8]) -> Result<i64, AuthError> {
    let claims = decode_claims(token, secret)?;
    subject_from_claims(&claims)
}
