pub mod env_flag;
pub mod health;
pub mod hostname;
pub mod logging;
pub mod site_config;
pub mod tls_config;
