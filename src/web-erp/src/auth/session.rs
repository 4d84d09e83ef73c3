use async_trait::async_trait;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sha2::{Digest, Sha512};
use tower_sessions::{Session, cookie::Key};
use tracing::error;

use super::users::AuthenticatedUser;

pub const COOKIE_NAME: &str = "sessionid";

/// Where the signed-in user lives inside the session record.
const USER_KEY: &str = "_auth_user";

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session store error: {0}")]
    Store(#[from] tower_sessions::session::Error),
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        error!(error = %self, "Session unavailable");
        (StatusCode::INTERNAL_SERVER_ERROR, "Session error").into_response()
    }
}

/// What the auth views need from the current request's session.
#[async_trait]
pub trait SessionBackend: Send + Sync {
    async fn current_user(&self) -> Result<Option<AuthenticatedUser>, SessionError>;

    /// Bind `user` to a fresh session id. Whatever the old id held is dropped.
    async fn sign_in(&self, user: AuthenticatedUser) -> Result<(), SessionError>;

    /// Delete the session record. Returns whether a user was signed in.
    async fn terminate(&self) -> Result<bool, SessionError>;
}

#[async_trait]
impl SessionBackend for Session {
    async fn current_user(&self) -> Result<Option<AuthenticatedUser>, SessionError> {
        Ok(self.get::<AuthenticatedUser>(USER_KEY).await?)
    }

    async fn sign_in(&self, user: AuthenticatedUser) -> Result<(), SessionError> {
        self.cycle_id().await?;
        self.insert(USER_KEY, user).await?;
        Ok(())
    }

    async fn terminate(&self) -> Result<bool, SessionError> {
        let signed_in = self.current_user().await?.is_some();
        self.flush().await?;
        Ok(signed_in)
    }
}

/// Cookie signing key derived from the site secret; SHA-512 yields the 64 bytes `Key` needs.
pub fn signing_key(secret: &str) -> Key {
    Key::from(Sha512::digest(secret.as_bytes()).as_slice())
}
