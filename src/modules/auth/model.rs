use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use rollbook_core::AppError;

use crate::modules::users::model::Role;

fn default_is_student() -> bool {
    true
}

/// Signup request. Role flags mirror the public API shape; omitted flags
/// default to a student account.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignupRequest {
    #[validate(length(min = 1, max = 25, message = "username must be 1-25 characters"))]
    pub username: String,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "password must not be empty"))]
    pub password: String,
    #[serde(default = "default_is_student")]
    pub is_student: bool,
    #[serde(default)]
    pub is_teacher: bool,
}

impl SignupRequest {
    /// Collapse the two role flags into the closed role enum. Exactly one
    /// flag must be set.
    pub fn role(&self) -> Result<Role, AppError> {
        match (self.is_student, self.is_teacher) {
            (true, false) => Ok(Role::Student),
            (false, true) => Ok(Role::Teacher),
            (true, true) => Err(AppError::bad_request(anyhow::anyhow!(
                "User can't be a student and a teacher at the same time"
            ))),
            (false, false) => Err(AppError::bad_request(anyhow::anyhow!(
                "User has to be either a student or a teacher"
            ))),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "username must not be empty"))]
    pub username: String,
    #[validate(length(min = 1, message = "password must not be empty"))]
    pub password: String,
}

/// Access/refresh token pair returned by login.
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenPairResponse {
    pub access: String,
    pub refresh: String,
}

/// Fresh access token returned by the refresh endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct AccessTokenResponse {
    pub access: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}
