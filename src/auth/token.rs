use crate::error::AppError;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Lifetime of a regular session token.
pub const SESSION_TTL_HOURS: i64 = 24;
/// Lifetime of a token issued with "remember me".
pub const REMEMBER_TTL_DAYS: i64 = 30;

/// Represents the claims encoded within a session JWT.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject of the token: the user's id.
    pub sub: i32,
    /// Expiration timestamp (seconds since epoch).
    pub exp: usize,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: usize,
}

/// HMAC keys derived from the configured secret. Cheap to clone.
#[derive(Clone)]
pub struct SessionKeys {
    inner: Arc<KeyPair>,
}

struct KeyPair {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SessionKeys {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            inner: Arc::new(KeyPair {
                encoding: EncodingKey::from_secret(secret),
                decoding: DecodingKey::from_secret(secret),
            }),
        }
    }
}

/// A freshly signed session token and the moment it stops being accepted.
#[derive(Debug, Clone)]
pub struct SessionToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Signs a token for `user_id`.
///
/// The token expires after [`SESSION_TTL_HOURS`], or after [`REMEMBER_TTL_DAYS`]
/// when `remember` is set.
pub fn generate_token(
    keys: &SessionKeys,
    user_id: i32,
    remember: bool,
) -> Result<SessionToken, AppError> {
    let issued_at = Utc::now();
    let lifetime = if remember {
        Duration::days(REMEMBER_TTL_DAYS)
    } else {
        Duration::hours(SESSION_TTL_HOURS)
    };
    let expires_at = issued_at + lifetime;

    let claims = Claims {
        sub: user_id,
        exp: expires_at.timestamp() as usize,
        iat: issued_at.timestamp() as usize,
    };

    let token = encode(&Header::default(), &claims, &keys.inner.encoding)
        .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))?;

    Ok(SessionToken { token, expires_at })
}

/// Verifies a token's signature and expiry and returns its claims.
///
/// Any failure (malformed, wrong signature, expired) is an `AppError::Unauthorized`.
pub fn verify_token(keys: &SessionKeys, token: &str) -> Result<Claims, AppError> {
    let data = decode::<Claims>(token, &keys.inner.decoding, &Validation::default())?;
    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> SessionKeys {
        SessionKeys::new(b"test_secret_for_tokens")
    }

    #[test]
    fn test_token_generation_and_verification() {
        let keys = keys();
        let session = generate_token(&keys, 1, false).unwrap();
        let claims = verify_token(&keys, &session.token).unwrap();
        assert_eq!(claims.sub, 1);
        assert_eq!(claims.exp, session.expires_at.timestamp() as usize);
    }

    #[test]
    fn test_remember_extends_lifetime() {
        let keys = keys();
        let short = generate_token(&keys, 1, false).unwrap();
        let long = generate_token(&keys, 1, true).unwrap();

        let short_claims = verify_token(&keys, &short.token).unwrap();
        let long_claims = verify_token(&keys, &long.token).unwrap();

        assert_eq!(
            short_claims.exp - short_claims.iat,
            (SESSION_TTL_HOURS * 3600) as usize
        );
        assert_eq!(
            long_claims.exp - long_claims.iat,
            (REMEMBER_TTL_DAYS * 24 * 3600) as usize
        );
    }

    #[test]
    fn test_token_expiration() {
        let keys = keys();
        let issued = Utc::now() - Duration::hours(3);
        let claims = Claims {
            sub: 2,
            exp: (issued + Duration::hours(1)).timestamp() as usize,
            iat: issued.timestamp() as usize,
        };
        let expired = encode(&Header::default(), &claims, &keys.inner.encoding).unwrap();

        match verify_token(&keys, &expired) {
            Err(AppError::Unauthorized(msg)) => assert!(msg.contains("ExpiredSignature")),
            Ok(_) => panic!("Token should have been invalid due to expiration"),
            Err(e) => panic!("Unexpected error type for expired token: {:?}", e),
        }
    }

    #[test]
    fn test_invalid_token_signature() {
        let session = generate_token(&keys(), 3, false).unwrap();
        let other = SessionKeys::new(b"a_completely_different_secret");

        match verify_token(&other, &session.token) {
            Err(AppError::Unauthorized(msg)) => assert!(msg.contains("InvalidSignature")),
            Ok(_) => panic!("Token should have been invalid due to signature mismatch"),
            Err(e) => panic!("Unexpected error type for invalid signature: {:?}", e),
        }
    }

    #[test]
    fn test_garbage_token_is_unauthorized() {
        assert!(matches!(
            verify_token(&keys(), "not-a-jwt"),
            Err(AppError::Unauthorized(_))
        ));
    }
}
