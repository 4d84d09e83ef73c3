use axum::{Json, Router, routing::get};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::AppState;
use crate::auth::{SessionBackend, SessionError};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthCheckResponse {
    pub authenticated: bool,
    pub username: Option<String>,
    pub is_staff: bool,
}

/// JSON endpoints for scripts and the frontend.
pub fn urls(prefix: &str) -> Router<AppState> {
    Router::new().route(&format!("{prefix}/auth/check"), get(get_check))
}

/// GET {prefix}/auth/check
/// Reports who, if anyone, the request is signed in as
async fn get_check(session: Session) -> Result<Json<AuthCheckResponse>, SessionError> {
    let user = session.current_user().await?;
    Ok(Json(AuthCheckResponse {
        authenticated: user.is_some(),
        is_staff: user.as_ref().is_some_and(|u| u.is_staff),
        username: user.map(|u| u.username),
    }))
}
