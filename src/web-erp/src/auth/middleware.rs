use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tower_sessions::Session;
use tracing::debug;

use super::redirect::{found, login_url_with_next};
use super::session::SessionBackend;
use super::users::AuthenticatedUser;

/// Sends anonymous requests to the login page, which returns them here afterwards.
/// Signed-in requests continue with their [`AuthenticatedUser`] in the extensions.
pub async fn require_login(session: Session, request: Request, next: Next) -> Response {
    guard(&session, request, next, |_| true).await
}

/// Like [`require_login`], but the user must also be staff.
pub async fn require_staff(session: Session, request: Request, next: Next) -> Response {
    guard(&session, request, next, |user| user.is_staff).await
}

async fn guard<F>(session: &dyn SessionBackend, mut request: Request, next: Next, allowed: F) -> Response
where
    F: FnOnce(&AuthenticatedUser) -> bool,
{
    let user = match session.current_user().await {
        Ok(user) => user.filter(|user| allowed(user)),
        Err(e) => return e.into_response(),
    };

    match user {
        Some(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        None => {
            let target = request
                .uri()
                .path_and_query()
                .map(|pq| pq.as_str().to_string())
                .unwrap_or_else(|| request.uri().path().to_string());
            debug!(path = %target, "Sign-in required");
            found(login_url_with_next(&target))
        }
    }
}
