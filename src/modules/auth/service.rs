use sqlx::PgPool;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use rollbook_auth::{RefreshTokenClaims, create_access_token, create_refresh_token};
use rollbook_config::JwtConfig;
use rollbook_core::{AppError, hash_password, verify_password};

use super::model::{LoginRequest, SignupRequest, TokenPairResponse};
use crate::modules::users::model::{Role, User};

/// Credential row used only by login. Everything else works with the
/// sanitized [`User`].
#[derive(sqlx::FromRow)]
struct UserWithPassword {
    id: Uuid,
    username: String,
    role: Role,
    password: String,
}

pub struct AuthService;

impl AuthService {
    #[instrument(skip(db, dto), fields(user.username = %dto.username, db.operation = "INSERT", db.table = "users"))]
    pub async fn signup(db: &PgPool, dto: SignupRequest) -> Result<User, AppError> {
        debug!("Registering new user");

        // Flag validation before uniqueness probes would also be defensible;
        // the uniqueness checks come first to keep error precedence stable
        // for clients that retry.
        let email_taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)",
        )
        .bind(&dto.email)
        .fetch_one(db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error checking email uniqueness");
            AppError::from(e)
        })?;

        if email_taken {
            warn!(user.email = %dto.email, "Attempted signup with existing email");
            return Err(AppError::conflict(anyhow::anyhow!(
                "User with the email already exists"
            )));
        }

        let username_taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)",
        )
        .bind(&dto.username)
        .fetch_one(db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error checking username uniqueness");
            AppError::from(e)
        })?;

        if username_taken {
            warn!(user.username = %dto.username, "Attempted signup with existing username");
            return Err(AppError::conflict(anyhow::anyhow!(
                "User with the username already exists"
            )));
        }

        let role = dto.role()?;
        let hashed = hash_password(&dto.password)?;

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (username, email, password, role)
             VALUES ($1, $2, $3, $4)
             RETURNING id, username, email, role, created_at, updated_at",
        )
        .bind(&dto.username)
        .bind(&dto.email)
        .bind(&hashed)
        .bind(role)
        .fetch_one(db)
        .await
        .map_err(|e| {
            // Concurrent signup with the same email/username loses here.
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::conflict(anyhow::anyhow!(
                    "User with the email or username already exists"
                ));
            }
            error!(error = %e, "Database error creating user");
            AppError::from(e)
        })?;

        info!(user.id = %user.id, user.role = %user.role, "User registered successfully");

        Ok(user)
    }

    #[instrument(skip(db, dto, jwt_config), fields(user.username = %dto.username, db.operation = "SELECT", db.table = "users"))]
    pub async fn login(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<TokenPairResponse, AppError> {
        debug!("Attempting login");

        let user = sqlx::query_as::<_, UserWithPassword>(
            "SELECT id, username, role, password FROM users WHERE username = $1",
        )
        .bind(&dto.username)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error fetching user for login");
            AppError::from(e)
        })?;

        // Unknown username and wrong password produce the same message so the
        // response does not leak which usernames exist.
        let Some(user) = user else {
            warn!("Login attempt with unknown username");
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Invalid username or password"
            )));
        };

        if !verify_password(&dto.password, &user.password)? {
            warn!(user.id = %user.id, "Login attempt with wrong password");
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Invalid username or password"
            )));
        }

        let access = create_access_token(user.id, &user.username, user.role.as_str(), jwt_config)?;
        let refresh =
            create_refresh_token(user.id, &user.username, user.role.as_str(), jwt_config)?;

        info!(user.id = %user.id, "Login successful");

        Ok(TokenPairResponse { access, refresh })
    }

    /// Mint a new access token from verified refresh-token claims. The
    /// refresh token itself is not rotated.
    pub fn refresh_access_token(
        claims: &RefreshTokenClaims,
        jwt_config: &JwtConfig,
    ) -> Result<String, AppError> {
        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::unauthorized(anyhow::anyhow!("Invalid user ID in token")))?;

        create_access_token(user_id, &claims.username, &claims.role, jwt_config)
    }
}
