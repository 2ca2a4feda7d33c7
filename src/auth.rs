use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use chrono::Utc;
use jsonwebtoken::{
    DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tower_sessions::Session;

use crate::{config::AppConfig, error::ApiError};

/// Fixed session field that holds the current access token. Written only by
/// the login handler; read only by the authentication gate.
pub const SESSION_AUTH_KEY: &str = "authorization";

/// Claims
///
/// Represents the payload structure embedded inside an issued access token.
/// These claims are signed with the server's process-wide secret and validated
/// upon every request to a protected route.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (sub): the username the token was issued to. This is the
    /// identity the gate attaches to the request on success.
    pub sub: String,
    /// Expiration Time (exp): timestamp after which the token must not be
    /// accepted. There is no revocation; expiry is the only end of life.
    pub exp: usize,
    /// Issued At (iat): timestamp when the token was issued.
    pub iat: usize,
}

/// TokenError
///
/// Verification outcome for a token that did not pass. The two causes stay
/// separate so the gate's log line can say which one occurred, even though
/// both surface to the client as the same rejection.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("token invalid")]
    Invalid,
}

/// issue_token
///
/// Creates a signed access token for a username that already passed the
/// credential check. Encodes subject = username, issuedAt = now and the
/// configured lifetime.
pub fn issue_token(username: &str, secret: &str, ttl_secs: u64) -> Result<String, ApiError> {
    let now = Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: username.to_string(),
        iat: now,
        exp: now + ttl_secs as usize,
    };

    let key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), &claims, &key)
        .map_err(|e| ApiError::Internal(format!("token signing failed: {e}")))
}

/// verify_token
///
/// Validates the signature and expiry of a token and recovers the embedded
/// subject. Pure apart from the shared secret: no state is read or written.
pub fn verify_token(token: &str, secret: &str) -> Result<String, TokenError> {
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::default();
    // Ensure expiration time validation is always active.
    validation.validate_exp = true;

    match decode::<Claims>(token, &decoding_key, &validation) {
        Ok(data) => Ok(data.claims.sub),
        Err(e) => match e.kind() {
            // Token expired: the common failure for a valid-but-old token.
            ErrorKind::ExpiredSignature => Err(TokenError::Expired),
            // All other failure types: bad signature, tampering, malformed blob.
            _ => Err(TokenError::Invalid),
        },
    }
}

/// AuthUser Extractor Result
///
/// The resolved identity of an authenticated request. Handlers on protected
/// routes take this as an argument; the username here is the only identity
/// ever used for review ownership, never anything from the request payload.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub username: String,
}

/// AuthUser Extractor Implementation
///
/// Implements Axum's FromRequestParts trait, making AuthUser usable as a
/// function argument in any protected handler. This is the authentication
/// gate: it runs once per request to a protected path, synchronously before
/// the target handler, and never mutates the session or the directory.
///
/// The process, per request:
/// 1. Session Resolution: pull the session record installed by the session layer.
/// 2. Slot Check: a session without the authorization slot is rejected as
///    "not logged in", a distinct cause from a bad token.
/// 3. Token Validation: verify signature and expiry, recover the subject.
///    Invalid or expired tokens are rejected as "not authenticated".
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    // Allows the extractor to pull the AppConfig (for the token secret).
    AppConfig: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = AppConfig::from_ref(state);

        // 1. Session Resolution
        // The session layer inserts the session record into the request
        // extensions; its absence means the layer is not installed at all.
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, msg)| ApiError::Internal(format!("session layer missing: {msg}")))?;

        // 2. Slot Check
        let token: Option<String> = session
            .get(SESSION_AUTH_KEY)
            .await
            .map_err(|e| ApiError::Internal(format!("session store failed: {e}")))?;
        let token = token.ok_or(ApiError::NotLoggedIn)?;

        // 3. Token Validation
        let username = verify_token(&token, &config.token_secret).map_err(|e| {
            tracing::debug!("rejected session token: {e}");
            ApiError::NotAuthenticated
        })?;

        Ok(AuthUser { username })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret";

    #[test]
    fn issued_token_verifies_to_its_subject() {
        let token = issue_token("henrik", SECRET, 3600).unwrap();
        assert_eq!(verify_token(&token, SECRET), Ok("henrik".to_string()));
    }

    #[test]
    fn wrong_secret_is_invalid() {
        let token = issue_token("henrik", SECRET, 3600).unwrap();
        assert_eq!(
            verify_token(&token, "another-secret"),
            Err(TokenError::Invalid)
        );
    }

    #[test]
    fn garbage_blob_is_invalid() {
        assert_eq!(
            verify_token("not.a.token", SECRET),
            Err(TokenError::Invalid)
        );
    }

    #[test]
    fn expired_token_is_expired() {
        // Issued two hours in the past so the decoder's default leeway
        // cannot rescue it.
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: "henrik".to_string(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let key = EncodingKey::from_secret(SECRET.as_bytes());
        let token = encode(&Header::default(), &claims, &key).unwrap();

        assert_eq!(verify_token(&token, SECRET), Err(TokenError::Expired));
    }
}
