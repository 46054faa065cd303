use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::instrument;
use utoipa::ToSchema;
use uuid::Uuid;

use rollbook_core::AppError;

use super::model::{
    AccessTokenResponse, LoginRequest, MessageResponse, SignupRequest, TokenPairResponse,
};
use super::service::AuthService;
use crate::middleware::auth::{AuthUser, RefreshUser};
use crate::modules::users::model::User;
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Register a new user as a student or a teacher
#[utoipa::path(
    post,
    path = "/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User registered successfully", body = User),
        (status = 400, description = "Both role flags set, or neither", body = ErrorResponse),
        (status = 409, description = "Email or username already taken", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<SignupRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = AuthService::signup(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Login and receive an access/refresh token pair
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenPairResponse),
        (status = 400, description = "Invalid username or password", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<TokenPairResponse>, AppError> {
    let tokens = AuthService::login(&state.db, dto, &state.jwt_config).await?;
    Ok(Json(tokens))
}

/// Exchange a refresh token for a new access token
#[utoipa::path(
    get,
    path = "/auth/refresh",
    responses(
        (status = 200, description = "New access token issued", body = AccessTokenResponse),
        (status = 401, description = "Missing or invalid refresh token", body = ErrorResponse)
    ),
    tag = "Authentication",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, refresh_user))]
pub async fn refresh_token(
    State(state): State<AppState>,
    refresh_user: RefreshUser,
) -> Result<Json<AccessTokenResponse>, AppError> {
    let access = AuthService::refresh_access_token(&refresh_user.0, &state.jwt_config)?;
    Ok(Json(AccessTokenResponse { access }))
}

/// Authorization probe: succeeds iff the caller holds a valid access token
#[utoipa::path(
    get,
    path = "/auth/",
    responses(
        (status = 200, description = "Caller is authorized", body = MessageResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    tag = "Authentication",
    security(("bearer_auth" = []))
)]
pub async fn check_authorization(_auth_user: AuthUser) -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "AUTHORIZED".to_string(),
    })
}

/// List all users (sanitized records)
#[utoipa::path(
    get,
    path = "/auth/all-users",
    responses(
        (status = 200, description = "All users", body = [User]),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    tag = "Authentication",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_all_users(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> Result<Json<Vec<User>>, AppError> {
    let users = UserService::get_all_users(&state.db).await?;
    Ok(Json(users))
}

/// Fetch one user by id
#[utoipa::path(
    get,
    path = "/auth/get-user/{user_id}",
    params(
        ("user_id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User details", body = User),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "Authentication",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_user(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<User>, AppError> {
    let user = UserService::get_user_by_id(&state.db, user_id).await?;
    Ok(Json(user))
}
