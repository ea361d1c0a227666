use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use redis::Client;

use crate::auth::errors::CacheError;
use crate::auth::models::AccessToken;
use crate::auth::models::UserId;
use crate::auth::ports::TokenCache;

/// Redis-backed session cache.
///
/// One key per session, `session:{user_id}:{token}`. Expiry is owned by
/// Redis through the TTL set on write; the adapter never reaps keys itself.
/// The composite key shape keeps a per-user `session:{user_id}:*` scan
/// possible if a bulk-revocation flow is ever added.
pub struct RedisTokenCache {
    connection: ConnectionManager,
}

impl RedisTokenCache {
    /// Connect to the cache backend.
    ///
    /// The connection manager transparently reconnects after transient
    /// failures; individual commands still surface errors to the caller.
    ///
    /// # Arguments
    /// * `url` - Redis connection URL
    ///
    /// # Errors
    /// * `Unavailable` - Backend unreachable
    pub async fn connect(url: &str) -> Result<Self, CacheError> {
        let client = Client::open(url).map_err(|e| CacheError::Unavailable(e.to_string()))?;

        let connection = ConnectionManager::new(client)
            .await
            .map_err(|e| CacheError::Unavailable(e.to_string()))?;

        Ok(Self { connection })
    }

    fn session_key(user_id: &UserId, token: &AccessToken) -> String {
        format!("session:{}:{}", user_id, token.as_str())
    }
}

#[async_trait]
impl TokenCache for RedisTokenCache {
    async fn put(
        &self,
        user_id: &UserId,
        token: &AccessToken,
        ttl: Duration,
    ) -> Result<(), CacheError> {
        let mut connection = self.connection.clone();

        connection
            .set_ex::<_, _, ()>(Self::session_key(user_id, token), 1u8, ttl.as_secs())
            .await
            .map_err(|e| CacheError::Unavailable(e.to_string()))
    }

    async fn exists(&self, user_id: &UserId, token: &AccessToken) -> Result<bool, CacheError> {
        let mut connection = self.connection.clone();

        connection
            .exists(Self::session_key(user_id, token))
            .await
            .map_err(|e| CacheError::Unavailable(e.to_string()))
    }

    async fn delete(&self, user_id: &UserId, token: &AccessToken) -> Result<(), CacheError> {
        let mut connection = self.connection.clone();

        connection
            .del::<_, ()>(Self::session_key(user_id, token))
            .await
            .map_err(|e| CacheError::Unavailable(e.to_string()))
    }
}
