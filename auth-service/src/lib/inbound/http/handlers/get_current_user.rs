use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::auth::models::User;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn get_current_user(
    State(state): State<AppState>,
    Extension(session): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<GetCurrentUserResponseData>, ApiError> {
    state
        .auth_service
        .get_user(&session.user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GetCurrentUserResponseData {
    pub id: String,
    pub email: String,
    pub profile: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for GetCurrentUserResponseData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.as_str().to_string(),
            profile: user.profile.clone(),
            created_at: user.created_at,
        }
    }
}
