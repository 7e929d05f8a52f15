//! Authentication ports.

use uuid::Uuid;

/// Claims carried by an access token.
///
/// The canonical identity claim is the user id; the email rides along for
/// display so handlers do not need a lookup just to echo it.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub user_id: Uuid,
    pub email: String,
    pub exp: i64,
}

/// Token service trait for issuing and verifying access tokens.
pub trait TokenService: Send + Sync {
    /// Issue a signed, time-limited token for a user.
    fn issue(&self, user_id: Uuid, email: &str) -> Result<String, AuthError>;

    /// Verify signature and expiry, returning the embedded claims.
    fn verify(&self, token: &str) -> Result<TokenClaims, AuthError>;

    /// Configured token lifetime, for `expires_in` responses.
    fn expiration_seconds(&self) -> i64;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password with a fresh random salt.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a stored digest. A mismatch is `Ok(false)`,
    /// never an error.
    fn verify(&self, password: &str, digest: &str) -> Result<bool, AuthError>;
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
