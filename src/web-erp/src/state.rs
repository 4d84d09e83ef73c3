use core_erp::SiteConfig;
use std::sync::Arc;
use tower_sessions::MemoryStore;

use crate::auth::{Authenticator, UserDirectory};

/// Everything a request handler needs, shared across requests.
#[derive(Clone)]
pub struct AppState {
    pub session_store: MemoryStore,
    pub authenticator: Arc<dyn Authenticator>,
    pub config: Arc<SiteConfig>,
}

impl AppState {
    pub fn new(session_store: MemoryStore, authenticator: Arc<dyn Authenticator>, config: SiteConfig) -> Self {
        AppState {
            session_store,
            authenticator,
            config: Arc::new(config),
        }
    }

    /// Sessions kept in process memory, credentials checked against `directory`.
    pub fn in_memory(config: SiteConfig, directory: UserDirectory) -> Self {
        Self::new(MemoryStore::default(), Arc::new(directory), config)
    }
}
