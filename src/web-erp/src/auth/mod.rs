pub mod handlers;
pub mod middleware;
pub mod password;
pub mod redirect;
pub mod session;
pub mod users;

pub use handlers::{login, login_gate, logout, terminate_session};
pub use middleware::{require_login, require_staff};
pub use redirect::{HOME_URL, LOGIN_URL, LOGOUT_URL};
pub use session::{COOKIE_NAME, SessionBackend, SessionError};
pub use users::{AuthenticatedUser, Authenticator, UserDirectory, UserRecord};
