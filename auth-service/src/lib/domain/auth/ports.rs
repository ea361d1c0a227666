use std::time::Duration;

use async_trait::async_trait;

use crate::auth::errors::AuthError;
use crate::auth::errors::CacheError;
use crate::auth::models::AccessToken;
use crate::auth::models::Credentials;
use crate::auth::models::EmailAddress;
use crate::auth::models::RegisterUserCommand;
use crate::auth::models::User;
use crate::auth::models::UserId;

/// Port for authentication service operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user with hashed credentials.
    ///
    /// Performs exactly one durable write; the session cache is not touched.
    ///
    /// # Arguments
    /// * `command` - Validated command containing email, password, and profile
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Storage` - Durable store operation failed
    async fn register(&self, command: RegisterUserCommand) -> Result<User, AuthError>;

    /// Verify credentials and issue a fresh access token.
    ///
    /// Concurrent logins for the same user each yield an independent valid
    /// token; sessions are not mutually exclusive.
    ///
    /// # Arguments
    /// * `credentials` - Email and plaintext password
    ///
    /// # Returns
    /// The user together with the newly issued token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password (indistinguishable)
    /// * `Storage` - Durable store operation failed
    /// * `Cache` - Session cache write failed
    async fn login(&self, credentials: Credentials) -> Result<(User, AccessToken), AuthError>;

    /// Check whether the `(user id, token)` pair names a live session.
    ///
    /// Cache-only hot path: no durable-store access. Empty or malformed
    /// inputs return false without querying the cache. A cache failure also
    /// returns false - this check fails closed, never open.
    ///
    /// # Arguments
    /// * `user_id` - Raw user id string, typically from a request header
    /// * `access_token` - Raw token string, typically from a request header
    ///
    /// # Returns
    /// True iff the session exists and has not expired
    async fn is_authenticated(&self, user_id: &str, access_token: &str) -> bool;

    /// Revoke a session.
    ///
    /// Idempotent: revoking an unknown or already-expired token is a no-op
    /// success, so callers cannot distinguish "already logged out" from
    /// "logged out now". Other tokens of the same user are unaffected.
    ///
    /// # Arguments
    /// * `user_id` - Owning user
    /// * `access_token` - Token to revoke
    ///
    /// # Errors
    /// * `Cache` - Session cache delete failed
    async fn logout(&self, user_id: &UserId, access_token: &AccessToken) -> Result<(), AuthError>;

    /// Retrieve a user by unique identifier.
    ///
    /// Admin-style lookup; unlike the login path, `NotFound` surfaces
    /// directly here.
    ///
    /// # Arguments
    /// * `id` - User ID
    ///
    /// # Returns
    /// User entity
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `Storage` - Durable store operation failed
    async fn get_user(&self, id: &UserId) -> Result<User, AuthError>;
}

/// Persistence operations for the user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// The store's uniqueness constraint on the email column is the arbiter
    /// under concurrent registration: exactly one of two racing creates
    /// succeeds.
    ///
    /// # Arguments
    /// * `user` - User entity to create
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Storage` - Store operation failed
    async fn create(&self, user: User) -> Result<User, AuthError>;

    /// Retrieve user by email address.
    ///
    /// # Arguments
    /// * `email` - Email address to search for
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `Storage` - Store operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, AuthError>;

    /// Retrieve user by identifier.
    ///
    /// # Arguments
    /// * `id` - User ID
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `Storage` - Store operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AuthError>;
}

/// Session cache operations keyed by the `(user id, token)` composite.
///
/// The cache is the source of truth for session validity, not a performance
/// layer over a durable session table - there is no durable session table.
/// Absence of a key is authoritative proof the session is invalid.
#[async_trait]
pub trait TokenCache: Send + Sync + 'static {
    /// Store a session with expiry.
    ///
    /// Idempotent; overwrites silently if the key is already present.
    ///
    /// # Arguments
    /// * `user_id` - Owning user
    /// * `token` - Issued token
    /// * `ttl` - Time until the cache expires the entry on its own
    ///
    /// # Errors
    /// * `Unavailable` - Cache backend unreachable or timed out
    async fn put(
        &self,
        user_id: &UserId,
        token: &AccessToken,
        ttl: Duration,
    ) -> Result<(), CacheError>;

    /// Check whether a session key is present and unexpired.
    ///
    /// # Errors
    /// * `Unavailable` - Cache backend unreachable or timed out
    async fn exists(&self, user_id: &UserId, token: &AccessToken) -> Result<bool, CacheError>;

    /// Remove a session key.
    ///
    /// Idempotent; deleting an absent key is not an error.
    ///
    /// # Errors
    /// * `Unavailable` - Cache backend unreachable or timed out
    async fn delete(&self, user_id: &UserId, token: &AccessToken) -> Result<(), CacheError>;
}
