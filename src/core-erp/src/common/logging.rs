use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global tracing subscriber.
/// The filter comes from RUST_LOG, falling back to the supplied default directives
/// (e.g. `web_erp=debug,tower_http=debug`).
pub fn setup_logging(default_directives: &str) {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| default_directives.into()))
        .with(tracing_subscriber::fmt::layer())
        .init()
}
