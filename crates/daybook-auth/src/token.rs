//! JWT issuance and verification for the access/refresh token pair.
//!
//! Both token kinds are structurally identical signed payloads. They are
//! told apart by the `type` tag inside the payload and by being signed
//! with different secrets; a verifier for one kind rejects the other.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AuthError;

/// Token kind embedded in (and checked against) the signed payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Claims carried by every Daybook token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — user ID (UUID string).
    pub sub: String,
    pub email: String,
    /// Token kind tag.
    #[serde(rename = "type")]
    pub kind: TokenKind,
    /// Issued-at (Unix timestamp).
    pub iat: i64,
    /// Expiration (Unix timestamp).
    pub exp: i64,
    /// Unique token ID (UUID string).
    pub jti: String,
}

/// An access/refresh pair issued together.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

fn sign(
    user_id: Uuid,
    email: &str,
    kind: TokenKind,
    secret: &str,
    lifetime_secs: u64,
) -> Result<String, AuthError> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        kind,
        iat: now,
        exp: now + lifetime_secs as i64,
        jti: Uuid::new_v4().to_string(),
    };

    let key = EncodingKey::from_secret(secret.as_bytes());
    jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &key)
        .map_err(|e| AuthError::Crypto(format!("JWT encode: {e}")))
}

/// Issue a signed access/refresh token pair for a user.
///
/// The two tokens are signed with different secrets so that compromising
/// one secret cannot forge the other kind.
pub fn issue_pair(user_id: Uuid, email: &str, config: &AuthConfig) -> Result<TokenPair, AuthError> {
    Ok(TokenPair {
        access_token: sign(
            user_id,
            email,
            TokenKind::Access,
            &config.access_token_secret,
            config.access_token_lifetime_secs,
        )?,
        refresh_token: sign(
            user_id,
            email,
            TokenKind::Refresh,
            &config.refresh_token_secret,
            config.refresh_token_lifetime_secs,
        )?,
    })
}

fn decode(token: &str, secret: &str, expected: TokenKind) -> Result<Claims, AuthError> {
    let key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::new(Algorithm::HS256);

    let claims = jsonwebtoken::decode::<Claims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::TokenInvalid(e.to_string()),
        })?;

    if claims.kind != expected {
        return Err(AuthError::TokenInvalid("unexpected token type".into()));
    }

    Ok(claims)
}

/// Verify signature, expiry, and kind of an access token.
pub fn verify_access(token: &str, config: &AuthConfig) -> Result<Claims, AuthError> {
    decode(token, &config.access_token_secret, TokenKind::Access)
}

/// Verify signature, expiry, and kind of a refresh token.
pub fn verify_refresh(token: &str, config: &AuthConfig) -> Result<Claims, AuthError> {
    decode(token, &config.refresh_token_secret, TokenKind::Refresh)
}

/// Request-scoped identity derived from a verified access token.
///
/// Attached to a request by the auth middleware and discarded when the
/// request completes.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: Uuid,
    pub email: String,
}

impl TryFrom<Claims> for Identity {
    type Error = AuthError;

    fn try_from(claims: Claims) -> Result<Self, AuthError> {
        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|e| AuthError::TokenInvalid(format!("bad subject: {e}")))?;
        Ok(Identity {
            user_id,
            email: claims.email,
        })
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header value.
pub fn extract_bearer_token(header: &str) -> Option<&str> {
    header.strip_prefix("Bearer ")
}
