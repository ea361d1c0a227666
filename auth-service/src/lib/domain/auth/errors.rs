use credentials::PasswordError;
use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for session cache operations.
///
/// The cache backend owns session validity outright, so the only failure the
/// core distinguishes is the backend being unreachable. Timeouts land here
/// too; they are never swallowed.
#[derive(Debug, Clone, Error)]
pub enum CacheError {
    #[error("Session cache unavailable: {0}")]
    Unavailable(String),
}

/// Top-level error for all authentication operations
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid user ID: {0}")]
    InvalidUserId(#[from] UserIdError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    // Domain-level errors
    //
    // InvalidCredentials is deliberately ambiguous: an unknown identifier and
    // a wrong password both surface as this variant, so callers cannot probe
    // which accounts exist.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("User not found: {0}")]
    NotFound(String),

    // Infrastructure errors
    #[error("Storage error: {0}")]
    Storage(String),

    #[error(transparent)]
    Cache(#[from] CacheError),
}
