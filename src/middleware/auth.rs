use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use rollbook_auth::{Claims, RefreshTokenClaims, verify_refresh_token, verify_token};
use rollbook_core::AppError;

use crate::modules::users::model::Role;
use crate::state::AppState;

/// Extractor that validates the bearer access token and provides the
/// authenticated caller's claims. Claims carry the user id, username, and
/// role, so handlers never re-query the caller.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// Get the user ID as UUID
    pub fn user_id(&self) -> Result<uuid::Uuid, AppError> {
        uuid::Uuid::parse_str(&self.0.sub)
            .map_err(|_| AppError::unauthorized(anyhow::anyhow!("Invalid user ID in token")))
    }

    pub fn is_teacher(&self) -> bool {
        self.0.role == Role::Teacher.as_str()
    }

    pub fn is_student(&self) -> bool {
        self.0.role == Role::Student.as_str()
    }

    pub fn username(&self) -> &str {
        &self.0.username
    }
}

fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let auth_header = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::unauthorized(anyhow::anyhow!("Missing authorization header")))?;

    auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::unauthorized(anyhow::anyhow!("Invalid authorization header format"))
    })
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let claims = verify_token(token, &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}

/// Extractor for teacher-only endpoints. Fails with 403 when the caller's
/// role claim is not `teacher`.
#[derive(Debug, Clone)]
pub struct CurrentTeacher(pub AuthUser);

impl FromRequestParts<AppState> for CurrentTeacher {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_user = AuthUser::from_request_parts(parts, state).await?;

        if !auth_user.is_teacher() {
            return Err(AppError::forbidden(anyhow::anyhow!(
                "You have to be a teacher to carry out this request"
            )));
        }

        Ok(CurrentTeacher(auth_user))
    }
}

/// Extractor for student-only endpoints. Fails with 403 when the caller's
/// role claim is not `student`.
#[derive(Debug, Clone)]
pub struct CurrentStudent(pub AuthUser);

impl FromRequestParts<AppState> for CurrentStudent {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_user = AuthUser::from_request_parts(parts, state).await?;

        if !auth_user.is_student() {
            return Err(AppError::forbidden(anyhow::anyhow!(
                "You have to be a student to carry out this request"
            )));
        }

        Ok(CurrentStudent(auth_user))
    }
}

/// Extractor for the refresh endpoint: the presented bearer token must be a
/// valid *refresh* token. Access tokens are rejected with 401.
#[derive(Debug, Clone)]
pub struct RefreshUser(pub RefreshTokenClaims);

impl RefreshUser {
    pub fn user_id(&self) -> Result<uuid::Uuid, AppError> {
        uuid::Uuid::parse_str(&self.0.sub)
            .map_err(|_| AppError::unauthorized(anyhow::anyhow!("Invalid user ID in token")))
    }
}

impl FromRequestParts<AppState> for RefreshUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let claims = verify_refresh_token(token, &state.jwt_config)
            .map_err(|_| AppError::unauthorized(anyhow::anyhow!("Please provide a valid refresh token")))?;

        Ok(RefreshUser(claims))
    }
}
