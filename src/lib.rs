//! # Rollbook API
//!
//! A course-enrollment REST API built with Rust, Axum, and PostgreSQL.
//! Users sign up as students or teachers, teachers place and manage courses,
//! and students enroll in and unenroll from them. Every protected endpoint
//! is gated by JWT bearer authentication.
//!
//! ## Architecture
//!
//! The codebase follows a modular architecture inspired by NestJS:
//!
//! ```text
//! src/
//! ├── docs.rs           # OpenAPI documentation setup
//! ├── logging.rs        # Per-request logging middleware
//! ├── middleware/       # Auth extractors (AuthUser, CurrentTeacher, ...)
//! ├── modules/          # Feature modules
//! │   ├── auth/        # Signup, login, token refresh
//! │   ├── users/       # User model and queries
//! │   └── courses/     # Course CRUD + enrollment state machine
//! ├── router.rs         # Main application router
//! ├── state.rs          # Shared application state
//! └── validator.rs      # Request validation extractor
//! ```
//!
//! Each feature module follows a consistent structure:
//!
//! - `mod.rs`: module exports
//! - `controller.rs`: HTTP handlers
//! - `service.rs`: business logic
//! - `model.rs`: data models, DTOs, database structs
//! - `router.rs`: axum router configuration
//!
//! ## Roles
//!
//! A user is exactly one of `student` or `teacher`. The role is a closed
//! enum end to end (Postgres enum, serde, JWT claim), so the two can never
//! be combined.
//!
//! ## Authentication
//!
//! Login returns an access/refresh token pair. The access token carries the
//! user's id, username, and role; `GET /auth/refresh` accepts the refresh
//! token and mints a new access token.
//!
//! ## API Documentation
//!
//! When the server is running, API documentation is available at:
//!
//! - Swagger UI: `http://localhost:3000/swagger-ui`
//! - Scalar: `http://localhost:3000/scalar`

pub mod docs;
pub mod logging;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;

// Re-export workspace crates for convenience
pub use rollbook_auth;
pub use rollbook_config;
pub use rollbook_core;
pub use rollbook_db;
