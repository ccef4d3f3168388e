//! Authentication ports.

use uuid::Uuid;

/// Claims carried by a validated access token.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub user_id: Uuid,
    pub email: String,
    pub exp: i64,
}

/// An access/refresh token pair issued at login.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Token service trait for bearer-token operations.
pub trait TokenService: Send + Sync {
    /// Issue an access/refresh pair for a user.
    fn issue_pair(&self, user_id: Uuid, email: &str) -> Result<TokenPair, AuthError>;

    /// Validate a bearer credential and decode its claims. Only access
    /// tokens are accepted; refresh tokens are rejected here.
    fn validate_access(&self, token: &str) -> Result<TokenClaims, AuthError>;

    /// Lifetime of a freshly issued access token, in seconds.
    fn access_expiry_seconds(&self) -> i64;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing authorization header")]
    MissingAuth,

    #[error("Hashing error: {0}")]
    HashingError(String),
}
