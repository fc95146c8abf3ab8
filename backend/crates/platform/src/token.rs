//! Bearer Token Issue and Verification
//!
//! Stateless signed tokens (JWT, HS256). Validity is purely cryptographic:
//! nothing is stored server-side and there is no revocation list. Every
//! token carries an expiry claim and verification enforces it.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Token verification/issue errors
#[derive(Debug, Error)]
pub enum TokenError {
    /// Token expiry claim is in the past
    #[error("Token has expired")]
    Expired,

    /// Signature or format verification failed
    #[error("Invalid token")]
    Invalid,

    /// Token could not be signed
    #[error("Token signing failed: {0}")]
    Signing(String),
}

/// Claims embedded in every issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject user id (store surrogate key)
    pub sub: i64,
    /// Role code at issue time
    pub role: String,
    /// Issued-at, seconds since epoch
    pub iat: i64,
    /// Expiry, seconds since epoch
    pub exp: i64,
}

/// Signs and verifies bearer tokens with a shared HS256 secret.
///
/// The secret is injected at construction; it never lives in source.
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenCodec {
    /// Create a codec from secret material and a token lifetime.
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Exact expiry, no clock-skew grace
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    /// Issue a signed token for the given subject and role.
    pub fn issue(&self, sub: i64, role: &str) -> Result<String, TokenError> {
        let iat = unix_now();
        let claims = TokenClaims {
            sub,
            role: role.to_string(),
            iat,
            exp: iat + self.ttl.as_secs() as i64,
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify a token's signature and expiry, returning its claims.
    pub fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        decode::<TokenClaims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
