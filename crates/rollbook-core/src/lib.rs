//! # Rollbook Core
//!
//! Core types shared across the Rollbook API:
//!
//! - [`errors`]: application error type with HTTP response conversion
//! - [`password`]: bcrypt password hashing and verification

pub mod errors;
pub mod password;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use password::{hash_password, verify_password};
