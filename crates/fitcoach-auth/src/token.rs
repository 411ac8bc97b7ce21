use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{AuthError, Result};

/// Fixed session-token lifetime: one day, no refresh.
pub const TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

/// Payload of a session token. Stateless: there is no server-side
/// revocation list, so logout is purely client-side deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub id: String,
    pub email: String,
    pub exp: usize,
}

/// Issue a signed HS256 session token for a user.
pub fn issue_token(user_id: &str, email: &str, secret: &str) -> Result<String> {
    let exp = Utc::now() + Duration::seconds(TOKEN_TTL_SECS);
    let claims = Claims {
        id: user_id.to_owned(),
        email: email.to_owned(),
        exp: exp.timestamp() as usize,
    };

    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?)
}

/// Full verification: signature and expiry. Used by protected endpoints.
///
/// Expiry is exact: no clock-skew leeway window.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(map_jwt_error)
}

/// Structural check only: three segments, decodable payload, unexpired
/// `exp`. Does not need the signing key, so clients can validate a cached
/// token offline before restoring a session.
pub fn inspect_claims(token: &str) -> Result<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.leeway = 0;

    decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims)
        .map_err(map_jwt_error)
}

fn map_jwt_error(e: jsonwebtoken::errors::Error) -> AuthError {
    match e.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        ErrorKind::InvalidToken | ErrorKind::Base64(_) | ErrorKind::Json(_) => {
            AuthError::MalformedToken
        }
        _ => AuthError::Jwt(e),
    }
}
