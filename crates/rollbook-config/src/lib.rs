//! # Rollbook Config
//!
//! Configuration structs loaded from environment variables. `dotenvy` is
//! loaded once in the binary's `main`; everything here only reads `env`.

pub mod cors;
pub mod jwt;

pub use cors::CorsConfig;
pub use jwt::JwtConfig;
