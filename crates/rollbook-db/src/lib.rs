//! # Rollbook DB
//!
//! PostgreSQL connection pool initialization. The pool is created once at
//! startup and cloned into the application state; request handlers receive
//! it through axum `State` rather than a module-level singleton.

use std::env;

/// Initializes a PostgreSQL connection pool from `DATABASE_URL`.
///
/// # Panics
///
/// Panics if `DATABASE_URL` is not set or the connection cannot be
/// established. This runs once during startup, before the server binds.
pub async fn init_db_pool() -> sqlx::PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    sqlx::PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to database")
}

// Re-export PgPool for convenience
pub use sqlx::PgPool;
