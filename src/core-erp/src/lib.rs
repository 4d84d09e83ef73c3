pub mod common;

pub use common::{
    env_flag::parse_flag,
    health::health_check,
    hostname::{BindAddressError, get_bind_address},
    logging::setup_logging,
    site_config::{ConfigError, SiteConfig},
    tls_config::{TlsPaths, get_tls_config},
};
