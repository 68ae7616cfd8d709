use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::SecurityConfig;

/// Issuer claim stamped into every token.
pub const ISSUER: &str = "blog-api";
/// Audience claim stamped into and required from every token.
pub const AUDIENCE: &str = "blog-api";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    pub iss: String,
    /// Subject: the user id, stringified.
    pub sub: String,
    pub aud: String,
    pub exp: i64,
    pub iat: i64,
    pub nbf: i64,
    /// Unique token id. Carried for log correlation; there is no
    /// server-side revocation store, so it is never checked.
    pub jti: String,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,
    #[error("token signature is invalid")]
    InvalidSignature,
    #[error("token audience mismatch")]
    WrongAudience,
    #[error("token has expired")]
    Expired,
    #[error("token is not yet valid")]
    NotYetValid,
    #[error("signing secret is not configured")]
    MissingSecret,
    #[error("token could not be signed: {0}")]
    Signing(String),
    #[error("token verification failed: {0}")]
    Verification(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::ImmatureSignature => TokenError::NotYetValid,
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            ErrorKind::InvalidAudience => TokenError::WrongAudience,
            ErrorKind::InvalidToken | ErrorKind::Base64(_) | ErrorKind::Json(_) | ErrorKind::Utf8(_) => {
                TokenError::Malformed
            }
            _ => TokenError::Verification(err.to_string()),
        }
    }
}

/// Signs and verifies access tokens. Built once at startup and shared
/// through application state.
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    expiry_secs: i64,
}

impl TokenCodec {
    pub fn from_config(security: &SecurityConfig) -> Result<Self, TokenError> {
        if security.jwt_secret.is_empty() {
            return Err(TokenError::MissingSecret);
        }
        Ok(Self::new(security.jwt_secret.as_bytes(), security.jwt_expiry_secs))
    }

    pub fn new(secret: &[u8], expiry_secs: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[AUDIENCE]);
        validation.validate_nbf = true;
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            expiry_secs,
        }
    }

    /// Build and sign a fresh token for the given user id.
    pub fn issue(&self, user_id: i64) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();
        let claims = AccessToken {
            iss: ISSUER.to_string(),
            sub: user_id.to_string(),
            aud: AUDIENCE.to_string(),
            exp: now + self.expiry_secs,
            iat: now,
            nbf: now,
            jti: Uuid::new_v4().simple().to_string(),
        };

        tracing::debug!(user_id, jti = %claims.jti, "issued access token");

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Decode a compact token and verify signature, audience, expiry and
    /// not-before. The error reports the specific cause so callers can log
    /// it; for authorization decisions any `Err` means "invalid".
    pub fn verify(&self, token: &str) -> Result<AccessToken, TokenError> {
        let data = decode::<AccessToken>(token, &self.decoding, &self.validation)?;
        Ok(data.claims)
    }
}
