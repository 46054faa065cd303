//! JWT claim structures for access and refresh tokens.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Discriminates access from refresh tokens inside the signed payload.
///
/// The two claim shapes overlap (refresh claims are a superset), and serde
/// ignores unknown fields, so the verifier checks this field instead of
/// relying on which fields happen to be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// JWT claims for access tokens.
///
/// Everything needed for authentication and authorization is embedded here,
/// so protected handlers never look the caller up in the database.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    /// Username at token issue time
    pub username: String,
    /// Role slug: "student" or "teacher"
    pub role: String,
    /// Always [`TokenType::Access`]; verified on decode
    pub token_type: TokenType,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
}

/// JWT claims for refresh tokens.
///
/// Refresh tokens are long-lived and only accepted by the refresh endpoint.
/// The `jti` makes each issued token unique even within one second.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshTokenClaims {
    /// User ID (subject claim)
    pub sub: String,
    /// Username at token issue time
    pub username: String,
    /// Role slug: "student" or "teacher"
    pub role: String,
    /// Always [`TokenType::Refresh`]; verified on decode
    pub token_type: TokenType,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
    /// Unique token identifier (JWT ID)
    pub jti: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_serialize() {
        let claims = Claims {
            sub: "user-id-123".to_string(),
            username: "ada".to_string(),
            role: "student".to_string(),
            token_type: TokenType::Access,
            exp: 1234567890,
            iat: 1234567800,
        };
        let serialized = serde_json::to_string(&claims).unwrap();
        assert!(serialized.contains(r#""sub":"user-id-123""#));
        assert!(serialized.contains(r#""role":"student""#));
        assert!(serialized.contains(r#""token_type":"access""#));
    }

    #[test]
    fn test_claims_deserialize() {
        let json = r#"{"sub":"user-id-456","username":"grace","role":"teacher","token_type":"access","exp":9999999999,"iat":9999999900}"#;
        let claims: Claims = serde_json::from_str(json).unwrap();
        assert_eq!(claims.sub, "user-id-456");
        assert_eq!(claims.username, "grace");
        assert_eq!(claims.role, "teacher");
        assert_eq!(claims.token_type, TokenType::Access);
    }

    #[test]
    fn test_refresh_token_claims_roundtrip() {
        let claims = RefreshTokenClaims {
            sub: "user-123".to_string(),
            username: "ada".to_string(),
            role: "student".to_string(),
            token_type: TokenType::Refresh,
            exp: 1234567890,
            iat: 1234567800,
            jti: "test-jti-123".to_string(),
        };
        let serialized = serde_json::to_string(&claims).unwrap();
        let parsed: RefreshTokenClaims = serde_json::from_str(&serialized).unwrap();
        assert_eq!(parsed.jti, "test-jti-123");
        assert_eq!(parsed.sub, claims.sub);
        assert_eq!(parsed.token_type, TokenType::Refresh);
    }
}
