//! Access and refresh token primitives.
//!
//! Access tokens are short-lived HS256 JWTs. Refresh tokens are opaque
//! random strings; the server persists only their SHA-256 digest, so a
//! leaked sessions table cannot be replayed.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use peerline_core::types::DbId;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Payload carried by every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// The user's database id.
    pub sub: DbId,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,
    /// Unique token id for auditing.
    pub jti: String,
}

/// Signing secret and token lifetimes.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// Access token lifetime in minutes (`JWT_ACCESS_EXPIRY_MINS`, default 15).
    pub access_token_expiry_mins: i64,
    /// Refresh token lifetime in days (`JWT_REFRESH_EXPIRY_DAYS`, default 7).
    pub refresh_token_expiry_days: i64,
}

impl JwtConfig {
    /// Read the JWT settings from the environment.
    ///
    /// # Panics
    ///
    /// Panics when `JWT_SECRET` is unset or empty. There is no usable
    /// fallback for a signing secret.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let access_token_expiry_mins = std::env::var("JWT_ACCESS_EXPIRY_MINS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(15);
        let refresh_token_expiry_days = std::env::var("JWT_REFRESH_EXPIRY_DAYS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(7);

        Self {
            secret,
            access_token_expiry_mins,
            refresh_token_expiry_days,
        }
    }
}

/// Sign a fresh access token for `user_id`.
pub fn generate_access_token(
    user_id: DbId,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let iat = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        exp: iat + config.access_token_expiry_mins * 60,
        iat,
        jti: Uuid::new_v4().to_string(),
    };

    // Header::default() is HS256.
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Check the signature and expiry of an access token and return its claims.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
}

/// Mint a refresh token as `(plaintext, digest)`.
///
/// The plaintext goes to the client; only the digest is stored.
pub fn generate_refresh_token() -> (String, String) {
    let plaintext = Uuid::new_v4().to_string();
    let digest = hash_refresh_token(&plaintext);
    (plaintext, digest)
}

/// SHA-256 hex digest of a refresh token, for storage and lookup.
pub fn hash_refresh_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_secret(secret: &str) -> JwtConfig {
        JwtConfig {
            secret: secret.to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        }
    }

    #[test]
    fn access_token_round_trips() {
        let config = config_with_secret("a-test-secret-of-reasonable-length");
        let token = generate_access_token(42, &config).unwrap();

        let claims = validate_token(&token, &config).unwrap();
        assert_eq!(claims.sub, 42);
        assert!(claims.exp > claims.iat);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn expired_token_is_rejected() {
        let config = config_with_secret("a-test-secret-of-reasonable-length");

        // Expired well past the default 60s leeway.
        let iat = chrono::Utc::now().timestamp() - 600;
        let claims = Claims {
            sub: 1,
            exp: iat + 300,
            iat,
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        assert!(validate_token(&token, &config).is_err());
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let signer = config_with_secret("first-secret");
        let verifier = config_with_secret("second-secret");

        let token = generate_access_token(1, &signer).unwrap();
        assert!(validate_token(&token, &verifier).is_err());
    }

    #[test]
    fn refresh_token_digest_is_stable_sha256_hex() {
        let (plaintext, digest) = generate_refresh_token();
        assert_eq!(digest, hash_refresh_token(&plaintext));
        assert_eq!(digest.len(), 64);
    }
}
