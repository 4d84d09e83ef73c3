use axum::{Extension, Router, middleware, response::Html, routing::get};

use crate::AppState;
use crate::auth::{AuthenticatedUser, require_login};
use crate::templates::{HomeTemplate, RenderError, render};

/// The student/staff landing pages; every route requires a signed-in user.
pub fn urls(prefix: &str) -> Router<AppState> {
    Router::new()
        .route(&format!("{prefix}/"), get(home))
        .route_layer(middleware::from_fn(require_login))
}

async fn home(Extension(user): Extension<AuthenticatedUser>) -> Result<Html<String>, RenderError> {
    render(&HomeTemplate {
        username: user.username,
        is_staff: user.is_staff,
    })
}
