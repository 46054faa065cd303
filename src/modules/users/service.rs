use sqlx::PgPool;
use tracing::{debug, error, instrument};
use uuid::Uuid;

use rollbook_core::AppError;

use super::model::User;

const USER_COLUMNS: &str = "id, username, email, role, created_at, updated_at";

pub struct UserService;

impl UserService {
    #[instrument(skip(db), fields(user.id = %user_id, db.operation = "SELECT", db.table = "users"))]
    pub async fn get_user_by_id(db: &PgPool, user_id: Uuid) -> Result<User, AppError> {
        debug!("Fetching user by id");

        sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(user_id)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error fetching user");
            AppError::from(e)
        })?
        .ok_or_else(|| {
            debug!("User not found");
            AppError::not_found(anyhow::anyhow!("The user id does not exist"))
        })
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "users"))]
    pub async fn get_all_users(db: &PgPool) -> Result<Vec<User>, AppError> {
        debug!("Fetching all users");

        sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users ORDER BY created_at DESC",
            USER_COLUMNS
        ))
        .fetch_all(db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error fetching users");
            AppError::from(e)
        })
    }
}
