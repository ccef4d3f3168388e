//! JWT token service implementation.

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ripple_core::ports::{AuthError, TokenClaims, TokenPair, TokenService};

const TOKEN_TYPE_ACCESS: &str = "access";
const TOKEN_TYPE_REFRESH: &str = "refresh";

/// JWT token service configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_expiry_hours: i64,
    pub refresh_expiry_hours: i64,
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "change-me-in-production".to_string(),
            access_expiry_hours: 24,
            refresh_expiry_hours: 24 * 7,
            issuer: "ripple-api".to_string(),
        }
    }
}

/// Internal JWT claims structure for serialization.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String, // user_id
    email: String,
    token_type: String, // "access" or "refresh"
    exp: i64,           // expiration timestamp
    iat: i64,           // issued at
    iss: String,        // issuer
}

/// JWT-based token service issuing an access/refresh pair.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: JwtConfig,
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            encoding_key,
            decoding_key,
            config,
        }
    }

    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").unwrap_or_else(|_| "change-me-in-production".to_string());

        // Warn if using default secret in production
        if secret == "change-me-in-production" {
            let is_production = std::env::var("RUST_ENV")
                .map(|v| v == "production" || v == "prod")
                .unwrap_or(false);

            if is_production {
                tracing::error!(
                    "SECURITY: Using default JWT secret in production! Set JWT_SECRET environment variable."
                );
            } else {
                tracing::warn!("Using default JWT secret. Set JWT_SECRET for production use.");
            }
        }

        let config = JwtConfig {
            secret,
            access_expiry_hours: std::env::var("JWT_ACCESS_EXPIRY_HOURS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(24),
            refresh_expiry_hours: std::env::var("JWT_REFRESH_EXPIRY_HOURS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(24 * 7),
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "ripple-api".to_string()),
        };
        Self::new(config)
    }

    fn encode_token(
        &self,
        user_id: Uuid,
        email: &str,
        token_type: &str,
        expiry_hours: i64,
    ) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = now + TimeDelta::hours(expiry_hours);

        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            token_type: token_type.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }
}

impl TokenService for JwtTokenService {
    fn issue_pair(&self, user_id: Uuid, email: &str) -> Result<TokenPair, AuthError> {
        let access = self.encode_token(
            user_id,
            email,
            TOKEN_TYPE_ACCESS,
            self.config.access_expiry_hours,
        )?;
        let refresh = self.encode_token(
            user_id,
            email,
            TOKEN_TYPE_REFRESH,
            self.config.refresh_expiry_hours,
        )?;

        Ok(TokenPair { access, refresh })
    }

    fn validate_access(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.config.issuer]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            }
        })?;

        // A refresh token is not a bearer credential.
        if token_data.claims.token_type != TOKEN_TYPE_ACCESS {
            return Err(AuthError::InvalidToken(
                "expected an access token".to_string(),
            ));
        }

        let user_id = Uuid::parse_str(&token_data.claims.sub)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        Ok(TokenClaims {
            user_id,
            email: token_data.claims.email,
            exp: token_data.claims.exp,
        })
    }

    fn access_expiry_seconds(&self) -> i64 {
        self.config.access_expiry_hours * 3600
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key".to_string(),
            access_expiry_hours: 1,
            refresh_expiry_hours: 2,
            issuer: "test-issuer".to_string(),
        }
    }

    #[test]
    fn test_issue_pair_success() {
        let service = JwtTokenService::new(test_config());
        let user_id = Uuid::new_v4();

        let pair = service.issue_pair(user_id, "test@example.com").unwrap();

        assert!(!pair.access.is_empty());
        assert!(!pair.refresh.is_empty());
        assert_ne!(pair.access, pair.refresh);
    }

    #[test]
    fn test_validate_access_token_success() {
        let service = JwtTokenService::new(test_config());
        let user_id = Uuid::new_v4();
        let email = "test@example.com";

        let pair = service.issue_pair(user_id, email).unwrap();

        let claims = service.validate_access(&pair.access).unwrap();

        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.email, email);
    }

    #[test]
    fn test_refresh_token_rejected_as_bearer_credential() {
        let service = JwtTokenService::new(test_config());

        let pair = service
            .issue_pair(Uuid::new_v4(), "test@example.com")
            .unwrap();

        let result = service.validate_access(&pair.refresh);
        assert!(matches!(result, Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn test_validate_invalid_token() {
        let service = JwtTokenService::new(test_config());

        let result = service.validate_access("invalid-token");

        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), AuthError::InvalidToken(_)));
    }

    #[test]
    fn test_validate_wrong_issuer_token() {
        let service1 = JwtTokenService::new(JwtConfig {
            secret: "same-secret".to_string(),
            issuer: "issuer1".to_string(),
            ..test_config()
        });
        let service2 = JwtTokenService::new(JwtConfig {
            secret: "same-secret".to_string(),
            issuer: "issuer2".to_string(),
            ..test_config()
        });

        let pair = service1
            .issue_pair(Uuid::new_v4(), "test@test.com")
            .unwrap();

        let result = service2.validate_access(&pair.access);
        assert!(result.is_err());
    }

    #[test]
    fn test_access_expiry_seconds() {
        let service = JwtTokenService::new(JwtConfig {
            access_expiry_hours: 24,
            ..test_config()
        });

        assert_eq!(service.access_expiry_seconds(), 86400);
    }
}
