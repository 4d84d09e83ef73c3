use std::net::{AddrParseError, SocketAddr};
use std::num::ParseIntError;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, thiserror::Error)]
pub enum BindAddressError {
    #[error("Invalid port: {0}")]
    InvalidPort(#[from] ParseIntError),

    #[error("Invalid host: {0}")]
    InvalidHost(#[from] AddrParseError),
}

/// Gets the address to listen on from the env vars HOST and PORT.
/// Falls back to `127.0.0.1:8000` for whichever is unset.
pub fn get_bind_address() -> Result<SocketAddr, BindAddressError> {
    bind_address_from(std::env::var("HOST").ok(), std::env::var("PORT").ok())
}

fn bind_address_from(host: Option<String>, port: Option<String>) -> Result<SocketAddr, BindAddressError> {
    let host = host.unwrap_or_else(|| DEFAULT_HOST.to_string());
    let port = match port {
        Some(p) => p.trim().parse::<u16>()?,
        None => DEFAULT_PORT,
    };
    Ok(format!("{}:{}", host, port).parse::<SocketAddr>()?)
}
