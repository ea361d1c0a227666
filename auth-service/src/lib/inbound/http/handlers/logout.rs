use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;

use super::ApiError;
use crate::auth::models::AccessToken;
use crate::auth::models::UserId;
use crate::inbound::http::middleware::ACCESS_TOKEN_HEADER;
use crate::inbound::http::middleware::USER_ID_HEADER;
use crate::inbound::http::router::AppState;

/// Revoke the session named by the request headers.
///
/// Always answers 204 for missing, malformed, unknown, or expired sessions
/// alike - a caller must not be able to probe which tokens exist. Only a
/// cache backend failure surfaces, as a 500.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let user_id = headers
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok());
    let access_token = headers
        .get(ACCESS_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok());

    if let (Some(user_id), Some(access_token)) = (user_id, access_token) {
        if let Ok(user_id) = UserId::from_string(user_id) {
            state
                .auth_service
                .logout(&user_id, &AccessToken::new(access_token))
                .await
                .map_err(ApiError::from)?;
        }
    }

    Ok(StatusCode::NO_CONTENT)
}
