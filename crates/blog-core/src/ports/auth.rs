//! Authentication ports.

/// Claims recovered from a valid session token.
///
/// Only the user identifier travels with the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    pub user_id: i32,
}

/// A freshly issued session.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user_id: i32,
    /// Lifetime in seconds.
    pub expires_in: i64,
}

/// Issues and verifies signed session tokens.
pub trait SessionService: Send + Sync {
    /// Issue a session for a user.
    fn issue(&self, user_id: i32) -> Result<Session, AuthError>;

    /// Validate a session token and decode its claims.
    fn verify(&self, token: &str) -> Result<SessionClaims, AuthError>;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password with a fresh salt.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("That email doesn't exist, please try again")]
    UserNotFound,

    #[error("Password incorrect, please try again")]
    WrongPassword,

    #[error("Session expired")]
    SessionExpired,

    #[error("Invalid session: {0}")]
    InvalidSession(String),

    #[error("Hashing error: {0}")]
    Hashing(String),
}
