use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use crate::auth::models::UserId;
use crate::inbound::http::router::AppState;

/// Request header carrying the caller's user id
pub const USER_ID_HEADER: &str = "x-user-id";

/// Request header carrying the caller's access token
pub const ACCESS_TOKEN_HEADER: &str = "x-access-token";

/// Extension type carrying the authenticated user ID past the guard
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Guard for protected routes.
///
/// Reads the session headers and checks the pair against the session cache.
/// A missing header is "not authenticated", not an error - the response is
/// the same 401 an invalid session gets.
pub async fn require_session(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let user_id = header_value(&req, USER_ID_HEADER).map(str::to_owned);
    let access_token = header_value(&req, ACCESS_TOKEN_HEADER).map(str::to_owned);

    let (user_id, access_token) = match (user_id, access_token) {
        (Some(user_id), Some(access_token)) => (user_id, access_token),
        _ => return Err(unauthorized()),
    };

    if !state
        .auth_service
        .is_authenticated(&user_id, &access_token)
        .await
    {
        return Err(unauthorized());
    }

    // The service only answers true for well-formed ids, so this parse
    // cannot fail after a positive session check
    let user_id = UserId::from_string(&user_id).map_err(|_| unauthorized())?;

    req.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(req).await)
}

fn header_value<'a>(req: &'a Request, name: &str) -> Option<&'a str> {
    req.headers().get(name).and_then(|value| value.to_str().ok())
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": "Not authenticated"
        })),
    )
        .into_response()
}
