use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use credentials::PasswordHasher;
use credentials::TokenGenerator;

use crate::auth::errors::AuthError;
use crate::auth::models::AccessToken;
use crate::auth::models::Credentials;
use crate::auth::models::RegisterUserCommand;
use crate::auth::models::User;
use crate::auth::models::UserId;
use crate::auth::ports::AuthServicePort;
use crate::auth::ports::TokenCache;
use crate::auth::ports::UserRepository;

/// Domain service implementation for authentication operations.
///
/// Stateless between calls: all session state lives in the two injected
/// adapters. Correctness under concurrency relies on the store's uniqueness
/// constraint (register) and the cache's atomic per-key semantics (sessions),
/// so no internal locking is needed.
pub struct AuthService<R, C>
where
    R: UserRepository,
    C: TokenCache,
{
    repository: Arc<R>,
    token_cache: Arc<C>,
    password_hasher: PasswordHasher,
    token_generator: TokenGenerator,
    token_ttl: Duration,
}

impl<R, C> AuthService<R, C>
where
    R: UserRepository,
    C: TokenCache,
{
    /// Create a new authentication service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `token_cache` - Session cache implementation
    /// * `password_hasher` - Hasher carrying the configured cost
    /// * `token_ttl` - Process-wide session lifetime
    ///
    /// # Returns
    /// Configured authentication service instance
    pub fn new(
        repository: Arc<R>,
        token_cache: Arc<C>,
        password_hasher: PasswordHasher,
        token_ttl: Duration,
    ) -> Self {
        Self {
            repository,
            token_cache,
            password_hasher,
            token_generator: TokenGenerator::new(),
            token_ttl,
        }
    }
}

#[async_trait]
impl<R, C> AuthServicePort for AuthService<R, C>
where
    R: UserRepository,
    C: TokenCache,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<User, AuthError> {
        let password_hash = self.password_hasher.hash(&command.password)?;

        let user = User {
            id: UserId::new(),
            email: command.email,
            password_hash,
            profile: command.profile,
            created_at: Utc::now(),
        };

        let created_user = self.repository.create(user).await?;

        tracing::info!(user_id = %created_user.id, "Registered user");

        Ok(created_user)
    }

    async fn login(&self, credentials: Credentials) -> Result<(User, AccessToken), AuthError> {
        // An unknown email and a wrong password must be indistinguishable
        let user = self
            .repository
            .find_by_email(&credentials.email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !self
            .password_hasher
            .verify(&credentials.password, &user.password_hash)
        {
            return Err(AuthError::InvalidCredentials);
        }

        let token = AccessToken::new(self.token_generator.generate());

        self.token_cache
            .put(&user.id, &token, self.token_ttl)
            .await?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok((user, token))
    }

    async fn is_authenticated(&self, user_id: &str, access_token: &str) -> bool {
        // Policy, not error: malformed requests never reach the cache
        if user_id.is_empty() || access_token.is_empty() {
            return false;
        }

        let user_id = match UserId::from_string(user_id) {
            Ok(user_id) => user_id,
            Err(_) => return false,
        };

        let token = AccessToken::new(access_token);

        match self.token_cache.exists(&user_id, &token).await {
            Ok(live) => live,
            Err(e) => {
                // Fail closed: an unreachable cache means no session
                tracing::warn!(user_id = %user_id, error = %e, "Session check failed");
                false
            }
        }
    }

    async fn logout(&self, user_id: &UserId, access_token: &AccessToken) -> Result<(), AuthError> {
        self.token_cache.delete(user_id, access_token).await?;

        tracing::info!(user_id = %user_id, "Session revoked");

        Ok(())
    }

    async fn get_user(&self, id: &UserId) -> Result<User, AuthError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(AuthError::NotFound(id.to_string()))
    }
}
