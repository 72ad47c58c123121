//! Authentication and authorization ports.

use async_trait::async_trait;

/// Role granted to sessions opened with the admin PIN.
pub const ADMIN_ROLE: &str = "admin";

/// Claims stored in JWT tokens.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub subject: String,
    pub roles: Vec<String>,
    pub exp: i64,
}

impl TokenClaims {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

/// Token service trait for JWT operations.
pub trait TokenService: Send + Sync {
    /// Generate an access token for a subject.
    fn generate_token(&self, subject: &str, roles: Vec<String>) -> Result<String, AuthError>;

    /// Validate and decode a token.
    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError>;

    /// Lifetime of issued tokens.
    fn expiration_seconds(&self) -> i64;
}

/// Password hashing service, used for the admin PIN.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text secret.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a secret against a hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Checks a submitted admin PIN against the stored one.
#[async_trait]
pub trait PinVerifier: Send + Sync {
    async fn verify_pin(&self, pin: &str) -> Result<bool, AuthError>;
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

    #[error("Insufficient permissions")]
    InsufficientPermissions,

    #[error("Hashing error: {0}")]
    HashingError(String),

    #[error("No admin PIN configured")]
    NotConfigured,

    #[error("Credential store error: {0}")]
    Store(String),
}
