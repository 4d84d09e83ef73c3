use axum::{Extension, Router, middleware, response::Html, routing::get};

use crate::AppState;
use crate::auth::{AuthenticatedUser, require_staff};
use crate::templates::{AdminIndexTemplate, RenderError, render};

/// Staff-only administration pages.
pub fn urls(prefix: &str) -> Router<AppState> {
    Router::new()
        .route(&format!("{prefix}/"), get(index))
        .route_layer(middleware::from_fn(require_staff))
}

async fn index(Extension(user): Extension<AuthenticatedUser>) -> Result<Html<String>, RenderError> {
    tracing::debug!(username = %user.username, "Admin index");
    render(&AdminIndexTemplate { username: user.username })
}
