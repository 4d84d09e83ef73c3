use std::path::PathBuf;
use std::time::Duration;

use super::env_flag::parse_flag;

/// Two weeks, matching the usual session cookie age.
const DEFAULT_SESSION_DURATION_SECONDS: u64 = 60 * 60 * 24 * 14;
const DEFAULT_LOGIN_REDIRECT_URL: &str = "/";
const DEFAULT_LOGIN_MIN_RESPONSE_MS: u64 = 1000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} environment variable is required. {hint}")]
    Missing { var: &'static str, hint: &'static str },

    #[error("{0} environment variable is set but empty")]
    Empty(&'static str),

    #[error("{var}={value:?} is invalid: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("TLS_CERT_PATH and TLS_KEY_PATH must be set together")]
    IncompleteTls,

    #[error("File does not exist: {0}")]
    MissingFile(PathBuf),

    #[error("Failed to load TLS certificate and key: {0}")]
    Tls(#[from] std::io::Error),
}

/// Site-wide settings for sessions and the login flow.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// HMAC key signing session cookies.
    pub session_secret: String,
    /// JSON file holding the user directory.
    pub users_file: PathBuf,
    pub session_duration_seconds: u64,
    /// Mark the session cookie `Secure` (HTTPS only).
    pub secure_cookies: bool,
    /// Where a successful sign-in lands when no usable `next` was supplied.
    pub login_redirect_url: String,
    /// Floor on how long a credential check takes to answer.
    pub login_min_response: Duration,
}

impl SiteConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through `lookup`, which returns the value of a variable if it is set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let session_secret = required(
            &lookup,
            "SESSION_SECRET",
            "Generate a secret with: openssl rand -base64 32",
        )?;

        let users_file = PathBuf::from(required(
            &lookup,
            "AUTH_USERS_FILE",
            "Create user records with: cargo run --bin hash-password -- <username> <password>",
        )?);

        let session_duration_seconds =
            parsed(&lookup, "SESSION_DURATION_SECONDS")?.unwrap_or(DEFAULT_SESSION_DURATION_SECONDS);

        let secure_cookies = lookup("SESSION_COOKIE_SECURE").map(|v| parse_flag(&v)).unwrap_or(false);

        let login_redirect_url = match lookup("LOGIN_REDIRECT_URL") {
            Some(url) if url.trim().starts_with('/') => url.trim().to_string(),
            Some(url) if url.trim().is_empty() => DEFAULT_LOGIN_REDIRECT_URL.to_string(),
            Some(url) => {
                return Err(ConfigError::Invalid {
                    var: "LOGIN_REDIRECT_URL",
                    value: url,
                    reason: "must be a path starting with '/'".to_string(),
                });
            }
            None => DEFAULT_LOGIN_REDIRECT_URL.to_string(),
        };

        let login_min_response = Duration::from_millis(
            parsed(&lookup, "LOGIN_MIN_RESPONSE_MS")?.unwrap_or(DEFAULT_LOGIN_MIN_RESPONSE_MS),
        );

        Ok(SiteConfig {
            session_secret,
            users_file,
            session_duration_seconds,
            secure_cookies,
            login_redirect_url,
            login_min_response,
        })
    }
}

fn required<F>(lookup: &F, var: &'static str, hint: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        Some(_) => Err(ConfigError::Empty(var)),
        None => Err(ConfigError::Missing { var, hint }),
    }
}

fn parsed<F>(lookup: &F, var: &'static str) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var)
        .map(|value| {
            value.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
                var,
                value: value.clone(),
                reason: e.to_string(),
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name| map.get(name).cloned()
    }

    const REQUIRED: [(&str, &str); 2] = [("SESSION_SECRET", "s3cret"), ("AUTH_USERS_FILE", "users.json")];

    #[test]
    fn test_defaults() {
        let config = SiteConfig::from_lookup(lookup_from(&REQUIRED)).unwrap();
        assert_eq!(config.session_secret, "s3cret");
        assert_eq!(config.users_file, PathBuf::from("users.json"));
        assert_eq!(config.session_duration_seconds, 1_209_600);
        assert!(!config.secure_cookies);
        assert_eq!(config.login_redirect_url, "/");
        assert_eq!(config.login_min_response, Duration::from_secs(1));
    }

    #[test]
    fn test_overrides() {
        let mut pairs = REQUIRED.to_vec();
        pairs.extend([
            ("SESSION_DURATION_SECONDS", "3600"),
            ("SESSION_COOKIE_SECURE", "yes"),
            ("LOGIN_REDIRECT_URL", "/info/"),
            ("LOGIN_MIN_RESPONSE_MS", "0"),
        ]);
        let config = SiteConfig::from_lookup(lookup_from(&pairs)).unwrap();
        assert_eq!(config.session_duration_seconds, 3600);
        assert!(config.secure_cookies);
        assert_eq!(config.login_redirect_url, "/info/");
        assert_eq!(config.login_min_response, Duration::ZERO);
    }

    #[test]
    fn test_missing_secret() {
        let err = SiteConfig::from_lookup(lookup_from(&[("AUTH_USERS_FILE", "users.json")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing { var: "SESSION_SECRET", .. }));
    }

    #[test]
    fn test_empty_users_file() {
        let err =
            SiteConfig::from_lookup(lookup_from(&[("SESSION_SECRET", "x"), ("AUTH_USERS_FILE", "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::Empty("AUTH_USERS_FILE")));
    }

    #[test]
    fn test_invalid_duration() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("SESSION_DURATION_SECONDS", "forever"));
        let err = SiteConfig::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "SESSION_DURATION_SECONDS", .. }));
    }

    #[test]
    fn test_redirect_url_must_be_a_path() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("LOGIN_REDIRECT_URL", "https://elsewhere.example"));
        let err = SiteConfig::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "LOGIN_REDIRECT_URL", .. }));
    }
}
