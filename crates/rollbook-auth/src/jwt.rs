//! Token creation and verification.
//!
//! Access tokens and refresh tokens share the signing secret, so every token
//! carries a `token_type` claim and each verifier checks it. Claim-shape
//! differences alone are not enough: refresh claims are a superset of access
//! claims and serde ignores unknown fields, so a refresh token would
//! otherwise decode as valid access claims.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use rollbook_config::JwtConfig;
use rollbook_core::AppError;

use crate::claims::{Claims, RefreshTokenClaims, TokenType};

/// Creates a short-lived access token carrying the user's id, username, and
/// role.
pub fn create_access_token(
    user_id: Uuid,
    username: &str,
    role: &str,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + jwt_config.access_token_expiry as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        username: username.to_string(),
        role: role.to_string(),
        token_type: TokenType::Access,
        exp,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to create token: {}", e)))
}

/// Verifies an access token and returns the embedded claims.
///
/// # Errors
///
/// Returns an unauthorized error when the signature is invalid, the token
/// has expired, it is malformed, or it is not an access token (a refresh
/// token presented to a protected endpoint fails here on its `token_type`
/// claim).
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized(anyhow::anyhow!("Invalid or expired token")))?;

    if claims.token_type != TokenType::Access {
        return Err(AppError::unauthorized(anyhow::anyhow!(
            "Invalid or expired token"
        )));
    }

    Ok(claims)
}

/// Creates a long-lived refresh token.
pub fn create_refresh_token(
    user_id: Uuid,
    username: &str,
    role: &str,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + jwt_config.refresh_token_expiry as usize;

    let claims = RefreshTokenClaims {
        sub: user_id.to_string(),
        username: username.to_string(),
        role: role.to_string(),
        token_type: TokenType::Refresh,
        exp,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to create refresh token: {}", e)))
}

/// Verifies a refresh token and returns the claims.
///
/// # Errors
///
/// Returns an unauthorized error on an invalid, expired, or malformed token,
/// and on any token whose `token_type` claim is not `refresh` (access tokens
/// additionally lack `jti` and fail to decode at all).
pub fn verify_refresh_token(
    token: &str,
    jwt_config: &JwtConfig,
) -> Result<RefreshTokenClaims, AppError> {
    let claims = decode::<RefreshTokenClaims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized(anyhow::anyhow!("Invalid or expired refresh token")))?;

    if claims.token_type != TokenType::Refresh {
        return Err(AppError::unauthorized(anyhow::anyhow!(
            "Invalid or expired refresh token"
        )));
    }

    Ok(claims)
}
