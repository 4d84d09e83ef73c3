use axum::{
    Router, middleware,
    routing::{any, get},
};
use core_erp::health_check;
use tower_http::trace::TraceLayer;
use tower_sessions::{
    Expiry, SessionManagerLayer,
    cookie::{SameSite, time::Duration},
};

use crate::AppState;
use crate::auth::{self, COOKIE_NAME, LOGIN_URL, LOGOUT_URL, session::signing_key};

pub mod admin;
pub mod apis;
pub mod info;
pub mod logging_middleware;

/// A route table that can be mounted under a path prefix.
/// It registers every path as `prefix + local path`, so `info::urls("/info")` serves `/info/`.
pub type UrlConf = fn(&str) -> Router<AppState>;

/// The route tables the site delegates to.
pub struct IncludedRoutes {
    pub admin: UrlConf,
    pub info: UrlConf,
    pub api: UrlConf,
}

impl Default for IncludedRoutes {
    fn default() -> Self {
        IncludedRoutes {
            admin: admin::urls,
            info: info::urls,
            api: apis::urls,
        }
    }
}

//
// Router
//

pub fn router(state: AppState, includes: IncludedRoutes) -> Router {
    let config = &state.config;
    let session_age = Duration::seconds(config.session_duration_seconds.min(u32::MAX as u64) as i64);
    let sessions = SessionManagerLayer::new(state.session_store.clone())
        .with_name(COOKIE_NAME)
        .with_http_only(true)
        .with_same_site(SameSite::Lax)
        .with_secure(config.secure_cookies)
        .with_expiry(Expiry::OnInactivity(session_age))
        .with_signed(signing_key(&config.session_secret));

    Router::new()
        .route("/health", get(health_check))
        .merge((includes.admin)("/admin"))
        .route(LOGIN_URL, any(auth::login))
        .route(LOGOUT_URL, any(auth::logout))
        .merge((includes.info)(""))
        .merge((includes.info)("/info"))
        .merge((includes.api)("/api"))
        // Every handler and guard can extract the request's Session
        .layer(sessions)
        .layer(middleware::from_fn(logging_middleware::log_route_access))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
