use axum::{
    extract::{RawForm, RawQuery, State, rejection::RawFormRejection},
    http::{HeaderMap, HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response},
};
use std::future::Future;
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tower_sessions::Session;
use tracing::{debug, error, info, warn};
use url::form_urlencoded;

use super::password::PasswordError;
use super::redirect::{HOME_URL, LOGIN_URL, found, safe_redirect_target};
use super::session::{SessionBackend, SessionError};
use crate::AppState;
use crate::templates::{LoginTemplate, RenderError, render};

const FIELD_REQUIRED: &str = "This field is required.";
const INVALID_LOGIN: &str =
    "Please enter a correct username and password. Note that both fields may be case-sensitive.";

/// The login form fields. Repeated fields keep their last value.
#[derive(Debug, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub next: Option<String>,
}

impl LoginForm {
    /// Read an `application/x-www-form-urlencoded` body. Never fails: unknown fields are ignored.
    pub fn parse(body: &[u8]) -> Self {
        let mut form = LoginForm::default();
        for (key, value) in form_urlencoded::parse(body) {
            match &*key {
                "username" => form.username = value.into_owned(),
                "password" => form.password = value.into_owned(),
                "next" => form.next = Some(value.into_owned()),
                _ => {}
            }
        }
        form
    }
}

/// The last `next` in a query string, if any.
pub fn next_from_query(query: Option<&str>) -> Option<String> {
    form_urlencoded::parse(query.unwrap_or_default().as_bytes())
        .filter(|(key, _)| key == "next")
        .map(|(_, value)| value.into_owned())
        .last()
}

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

impl IntoResponse for LoginError {
    fn into_response(self) -> Response {
        match self {
            LoginError::Render(e) => e.into_response(),
            other => {
                error!(error = %other, "Login failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Authentication error").into_response()
            }
        }
    }
}

/// GET|POST /accounts/login/
///
/// Every extractor here is infallible, so the gate always decides first.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    method: Method,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
    form: Result<RawForm, RawFormRejection>,
) -> Response {
    let authenticated = match session.current_user().await {
        Ok(user) => user.is_some(),
        Err(e) => return e.into_response(),
    };
    login_gate(authenticated, || {
        standard_login(&state, &session, method, &headers, query, form)
    })
    .await
}

/// Redirect an already signed-in user home; everyone else gets `delegate`'s response.
pub async fn login_gate<F, Fut, R>(authenticated: bool, delegate: F) -> Response
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = R>,
    R: IntoResponse,
{
    if authenticated {
        debug!("Already signed in, skipping the login form");
        return found(HOME_URL);
    }
    delegate().await.into_response()
}

/// The login form itself: render on GET, check credentials on POST.
async fn standard_login(
    state: &AppState,
    session: &dyn SessionBackend,
    method: Method,
    headers: &HeaderMap,
    query: Option<String>,
    form: Result<RawForm, RawFormRejection>,
) -> Result<Response, LoginError> {
    let query_next = next_from_query(query.as_deref());

    if method == Method::GET || method == Method::HEAD {
        let page = LoginTemplate {
            error: None,
            username: String::new(),
            next: query_next,
        };
        return Ok(render(&page)?.into_response());
    }

    if method != Method::POST {
        return Ok((
            StatusCode::METHOD_NOT_ALLOWED,
            [(header::ALLOW, HeaderValue::from_static("GET, HEAD, POST"))],
        )
            .into_response());
    }

    let form = match form {
        Ok(RawForm(body)) => LoginForm::parse(&body),
        Err(rejection) => {
            debug!(error = %rejection, "Unreadable login form, treating as empty");
            LoginForm::default()
        }
    };
    let username = form.username.trim().to_string();
    let next = form.next.or(query_next);

    if username.is_empty() || form.password.is_empty() {
        let page = LoginTemplate {
            error: Some(FIELD_REQUIRED),
            username,
            next,
        };
        return Ok(render(&page)?.into_response());
    }

    let start = Instant::now();
    let outcome = state.authenticator.authenticate(&username, &form.password);
    pad_response_time(start, state.config.login_min_response).await;

    let Some(user) = outcome? else {
        warn!(username = %username, "Failed login attempt");
        let page = LoginTemplate {
            error: Some(INVALID_LOGIN),
            username,
            next,
        };
        return Ok(render(&page)?.into_response());
    };

    // A fresh id: the pre-login session is never carried over.
    session.sign_in(user.clone()).await?;

    let host = headers.get(header::HOST).and_then(|h| h.to_str().ok());
    let target = safe_redirect_target(next.as_deref(), host, &state.config.login_redirect_url);

    info!(username = %user.username, "User logged in");
    Ok(found(target))
}

/// Any method on /accounts/logout/
pub async fn logout(session: Session) -> Response {
    terminate_session(&session).await
}

/// End the current session and send the client to the login page.
/// The session layer expires the cookie once the record is gone.
pub async fn terminate_session(session: &dyn SessionBackend) -> Response {
    match session.terminate().await {
        Ok(true) => info!("User logged out"),
        Ok(false) => debug!("Logout without a signed-in user"),
        Err(e) => return e.into_response(),
    }
    found(LOGIN_URL)
}

/// Hold the response until at least `floor` has passed since `start`.
async fn pad_response_time(start: Instant, floor: Duration) {
    let elapsed = start.elapsed();
    if elapsed < floor {
        sleep(floor - elapsed).await;
    }
}
