//! Middleware modules for request processing.
//!
//! # Authentication Flow
//!
//! 1. Client sends request with `Authorization: Bearer <token>` header
//! 2. [`auth::AuthUser`] validates the JWT and extracts claims (401 on failure)
//! 3. Role extractors ([`auth::CurrentTeacher`], [`auth::CurrentStudent`])
//!    reject callers with the wrong role (403)
//! 4. Ownership checks happen inside services after the entity is loaded

pub mod auth;
