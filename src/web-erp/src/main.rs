use anyhow::Context;
use core_erp::{SiteConfig, TlsPaths, get_bind_address, get_tls_config, setup_logging};
use tracing::info;

use web_erp::AppState;
use web_erp::auth::UserDirectory;
use web_erp::routes::{IncludedRoutes, router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    setup_logging("web_erp=debug,tower_http=debug");

    let config = SiteConfig::from_env()?;
    let directory = UserDirectory::load(&config.users_file)?;
    info!(users = directory.len(), path = %config.users_file.display(), "Loaded user directory");

    let app = router(AppState::in_memory(config, directory), IncludedRoutes::default());

    let addr = get_bind_address().context("Invalid HOST or PORT")?;

    match TlsPaths::from_env()? {
        Some(paths) => {
            let tls = get_tls_config(&paths).await?;
            info!(%addr, "Listening (HTTPS)");
            axum_server::bind_rustls(addr, tls)
                .serve(app.into_make_service())
                .await
                .context("Server error")?;
        }
        None => {
            let listener = tokio::net::TcpListener::bind(addr)
                .await
                .with_context(|| format!("Failed to bind to address: {}", addr))?;
            info!(%addr, "Listening");
            axum::serve(listener, app).await.context("Server error")?;
        }
    }

    Ok(())
}
