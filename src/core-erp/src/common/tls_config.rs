use axum_server::tls_rustls::RustlsConfig;
use std::path::PathBuf;

use super::site_config::ConfigError;

/// Certificate and private key locations, both PEM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsPaths {
    pub cert: PathBuf,
    pub key: PathBuf,
}

impl TlsPaths {
    /// Reads TLS_CERT_PATH and TLS_KEY_PATH.
    /// `None` when neither is set (serve plain HTTP); an error when only one is.
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        Self::from_values(
            std::env::var("TLS_CERT_PATH").ok().filter(|v| !v.trim().is_empty()),
            std::env::var("TLS_KEY_PATH").ok().filter(|v| !v.trim().is_empty()),
        )
    }

    fn from_values(cert: Option<String>, key: Option<String>) -> Result<Option<Self>, ConfigError> {
        match (cert, key) {
            (None, None) => Ok(None),
            (Some(cert), Some(key)) => Ok(Some(TlsPaths {
                cert: PathBuf::from(cert),
                key: PathBuf::from(key),
            })),
            _ => Err(ConfigError::IncompleteTls),
        }
    }
}

/// Loads the certificate and key into a rustls server configuration.
pub async fn get_tls_config(paths: &TlsPaths) -> Result<RustlsConfig, ConfigError> {
    for path in [&paths.cert, &paths.key] {
        if !path.exists() {
            return Err(ConfigError::MissingFile(path.clone()));
        }
    }

    // Already installed is fine.
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let config = RustlsConfig::from_pem_file(&paths.cert, &paths.key).await?;
    tracing::info!(cert = %paths.cert.display(), "Loaded TLS certificate");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_tls() {
        assert_eq!(TlsPaths::from_values(None, None).unwrap(), None);
    }

    #[test]
    fn test_both_paths() {
        let paths = TlsPaths::from_values(Some("cert.pem".into()), Some("key.pem".into()))
            .unwrap()
            .unwrap();
        assert_eq!(paths.cert, PathBuf::from("cert.pem"));
        assert_eq!(paths.key, PathBuf::from("key.pem"));
    }

    #[test]
    fn test_half_configured() {
        let err = TlsPaths::from_values(Some("cert.pem".into()), None).unwrap_err();
        assert!(matches!(err, ConfigError::IncompleteTls));
    }

    #[tokio::test]
    async fn test_missing_cert_file() {
        let paths = TlsPaths {
            cert: PathBuf::from("/definitely/not/here/cert.pem"),
            key: PathBuf::from("/definitely/not/here/key.pem"),
        };
        let err = get_tls_config(&paths).await.unwrap_err();
        assert!(matches!(err, ConfigError::MissingFile(_)));
    }
}
