use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;
use std::time::Instant;

use async_trait::async_trait;
use auth_service::auth::errors::AuthError;
use auth_service::auth::errors::CacheError;
use auth_service::auth::models::AccessToken;
use auth_service::auth::models::EmailAddress;
use auth_service::auth::models::User;
use auth_service::auth::models::UserId;
use auth_service::auth::ports::AuthServicePort;
use auth_service::auth::ports::TokenCache;
use auth_service::auth::ports::UserRepository;
use auth_service::auth::service::AuthService;
use auth_service::inbound::http::router::create_router;
use credentials::PasswordHasher;
use uuid::Uuid;

/// Session lifetime used by the test service
pub const TEST_TTL: Duration = Duration::from_secs(3600);

/// Test application that spawns a real server.
///
/// Wired with in-memory port implementations, so the suite exercises the
/// full HTTP surface without a Postgres or Redis instance.
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub repository: Arc<InMemoryUserRepository>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let repository = Arc::new(InMemoryUserRepository::new());
        let token_cache = Arc::new(InMemoryTokenCache::new());

        // Minimal legal hashing cost to keep the suite fast
        let password_hasher =
            PasswordHasher::with_params(8, 1, 1).expect("Failed to build password hasher");

        let auth_service: Arc<dyn AuthServicePort> = Arc::new(AuthService::new(
            Arc::clone(&repository),
            token_cache,
            password_hasher,
            TEST_TTL,
        ));

        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let router = create_router(auth_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            repository,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request carrying session headers
    pub fn get_with_session(&self, path: &str, user_id: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path)
            .header("x-user-id", user_id)
            .header("x-access-token", token)
    }

    /// Helper to make POST request carrying session headers
    pub fn post_with_session(
        &self,
        path: &str,
        user_id: &str,
        token: &str,
    ) -> reqwest::RequestBuilder {
        self.post(path)
            .header("x-user-id", user_id)
            .header("x-access-token", token)
    }

    /// Register a user and log in, returning `(user_id, access_token)`
    pub async fn register_and_login(&self, email: &str, password: &str) -> (String, String) {
        let response = self
            .post("/api/auth/register")
            .json(&serde_json::json!({"email": email, "password": password}))
            .send()
            .await
            .expect("Failed to execute request");
        assert!(response.status().is_success());

        self.login(email, password).await
    }

    /// Log in, returning `(user_id, access_token)`
    pub async fn login(&self, email: &str, password: &str) -> (String, String) {
        let response = self
            .post("/api/auth/login")
            .json(&serde_json::json!({"email": email, "password": password}))
            .send()
            .await
            .expect("Failed to execute request");
        assert!(response.status().is_success());

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        (
            body["data"]["user"]["id"].as_str().unwrap().to_string(),
            body["data"]["access_token"].as_str().unwrap().to_string(),
        )
    }
}

/// In-memory user store honoring the email uniqueness constraint
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
        }
    }

    pub fn user_count(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, AuthError> {
        let mut users = self.users.lock().unwrap();

        if users.iter().any(|existing| existing.email == user.email) {
            return Err(AuthError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ));
        }

        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, AuthError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|user| user.email == *email).cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AuthError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|user| user.id == *id).cloned())
    }
}

/// In-memory session cache with real expiry arithmetic
pub struct InMemoryTokenCache {
    sessions: Mutex<HashMap<(Uuid, String), Instant>>,
}

impl InMemoryTokenCache {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl TokenCache for InMemoryTokenCache {
    async fn put(
        &self,
        user_id: &UserId,
        token: &AccessToken,
        ttl: Duration,
    ) -> Result<(), CacheError> {
        let mut sessions = self.sessions.lock().unwrap();
        sessions.insert(
            (user_id.0, token.as_str().to_string()),
            Instant::now() + ttl,
        );
        Ok(())
    }

    async fn exists(&self, user_id: &UserId, token: &AccessToken) -> Result<bool, CacheError> {
        let sessions = self.sessions.lock().unwrap();
        Ok(sessions
            .get(&(user_id.0, token.as_str().to_string()))
            .is_some_and(|expiry| *expiry > Instant::now()))
    }

    async fn delete(&self, user_id: &UserId, token: &AccessToken) -> Result<(), CacheError> {
        let mut sessions = self.sessions.lock().unwrap();
        sessions.remove(&(user_id.0, token.as_str().to_string()));
        Ok(())
    }
}
