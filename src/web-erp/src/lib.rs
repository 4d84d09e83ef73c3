pub mod auth;
pub mod routes;
pub mod state;
pub mod templates;

pub use state::AppState;
