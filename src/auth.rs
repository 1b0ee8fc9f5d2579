//! Identity boundary
//!
//! Login and sessions are handled by an identity proxy in front of this
//! service. For each authenticated request it forwards the resolved user id
//! in `X-User-Id` together with `X-User-Signature`, the hex HMAC-SHA256 of
//! that id under a secret shared with this server. A request without a valid
//! pair is rejected before any handler code, and therefore any query, runs.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::constants::{USER_ID_HEADER, USER_SIGNATURE_HEADER};
use crate::error::{AppError, Result};
use crate::models::UserId;
use crate::AppState;

type HmacSha256 = Hmac<Sha256>;

/// Extractor for the authenticated caller
#[derive(Debug, Clone)]
pub struct AuthUser(pub UserId);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let user_id = header_value(parts, USER_ID_HEADER);
        let signature = header_value(parts, USER_SIGNATURE_HEADER);

        resolve_user(user_id, signature, &state.config.identity_secret_key).map(AuthUser)
    }
}

fn header_value<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts.headers.get(name).and_then(|v| v.to_str().ok())
}

/// Turn the forwarded identity headers into a verified user id
pub fn resolve_user(user_id: Option<&str>, signature: Option<&str>, secret: &str) -> Result<UserId> {
    let (Some(user_id), Some(signature)) = (user_id, signature) else {
        tracing::debug!("Request without identity headers");
        return Err(AppError::Unauthorized);
    };

    let Some(user_id) = UserId::new(user_id) else {
        tracing::warn!("Request with empty user id");
        return Err(AppError::Unauthorized);
    };

    if !verify_hmac(user_id.as_str(), signature, secret) {
        tracing::warn!("Invalid identity signature for user {}", user_id);
        return Err(AppError::Unauthorized);
    }

    Ok(user_id)
}

/// Verify a hex HMAC-SHA256 signature over `data`
///
/// Comparison is constant-time.
pub fn verify_hmac(data: &str, signature: &str, secret: &str) -> bool {
    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(m) => m,
        Err(_) => {
            tracing::error!("Failed to create HMAC instance");
            return false;
        }
    };

    mac.update(data.as_bytes());

    let sig_bytes = match hex::decode(signature.trim()) {
        Ok(bytes) => bytes,
        Err(_) => {
            tracing::warn!("Invalid hex signature format");
            return false;
        }
    };

    mac.verify_slice(&sig_bytes).is_ok()
}

/// Hex HMAC-SHA256 signature of a user id, as the identity proxy sends it
pub fn sign_user_id(user_id: &str, secret: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .unwrap_or_else(|_| unreachable!("HMAC accepts keys of any length"));
    mac.update(user_id.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}
