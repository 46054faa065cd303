//! # Rollbook Auth
//!
//! JWT claim structures and token utilities for the Rollbook API.
//!
//! Two token types exist:
//!
//! - **Access token** ([`Claims`]): short-lived, presented on every protected
//!   endpoint. Carries the user id, username, and role so handlers can
//!   authorize without re-querying the caller.
//! - **Refresh token** ([`RefreshTokenClaims`]): long-lived, accepted only by
//!   `GET /auth/refresh` to mint a new access token.

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::{Claims, RefreshTokenClaims, TokenType};
pub use jwt::{create_access_token, create_refresh_token, verify_refresh_token, verify_token};
