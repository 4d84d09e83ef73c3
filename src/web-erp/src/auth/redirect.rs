use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use url::Url;

pub const HOME_URL: &str = "/";
pub const LOGIN_URL: &str = "/accounts/login/";
pub const LOGOUT_URL: &str = "/accounts/logout/";

/// A `302 Found` to `location`.
pub fn found(location: impl Into<String>) -> Response {
    let location: String = location.into();
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

/// The login page, asking it to send the user back to `target` afterwards.
pub fn login_url_with_next(target: &str) -> String {
    format!("{}?next={}", LOGIN_URL, urlencoding::encode(target))
}

/// Where to send a user after signing in: `next` when it stays on this site, `default` otherwise.
pub fn safe_redirect_target(next: Option<&str>, host: Option<&str>, default: &str) -> String {
    match next.map(str::trim) {
        Some(next) if is_safe_redirect(next, host) => next.to_string(),
        _ => default.to_string(),
    }
}

fn is_safe_redirect(next: &str, host: Option<&str>) -> bool {
    if next.is_empty() || next.chars().any(char::is_control) {
        return false;
    }
    // Browsers read `//host` and `/\host` as scheme-relative.
    if next.starts_with("//") || next.starts_with("/\\") || next.starts_with('\\') {
        return false;
    }
    if next.starts_with('/') {
        return true;
    }

    match Url::parse(next) {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https")
                && host.is_some_and(|host| authority(&url).eq_ignore_ascii_case(host.trim()))
        }
        // Relative paths such as `info/` would resolve against the login URL
        Err(_) => false,
    }
}

fn authority(url: &Url) -> String {
    match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{}:{}", host, port),
        (Some(host), None) => host.to_string(),
        (None, _) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOST: Option<&str> = Some("erp.example.edu");

    #[test]
    fn test_found() {
        let response = found("/somewhere/");
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[header::LOCATION], "/somewhere/");
    }

    #[test]
    fn test_login_url_with_next() {
        assert_eq!(login_url_with_next("/info/"), "/accounts/login/?next=%2Finfo%2F");
        assert_eq!(
            login_url_with_next("/info/?page=2&x=y"),
            "/accounts/login/?next=%2Finfo%2F%3Fpage%3D2%26x%3Dy"
        );
    }

    #[test]
    fn test_local_paths_are_kept() {
        assert_eq!(safe_redirect_target(Some("/info/"), HOST, "/"), "/info/");
        assert_eq!(safe_redirect_target(Some("/api/x?y=1"), None, "/"), "/api/x?y=1");
    }

    #[test]
    fn test_relative_paths_use_default() {
        for next in ["info/", "./info/", "../admin/", "?next=/x"] {
            assert_eq!(safe_redirect_target(Some(next), HOST, "/"), "/", "{next:?}");
        }
    }

    #[test]
    fn test_missing_or_blank_next_uses_default() {
        assert_eq!(safe_redirect_target(None, HOST, "/home/"), "/home/");
        assert_eq!(safe_redirect_target(Some("   "), HOST, "/home/"), "/home/");
    }

    #[test]
    fn test_same_host_absolute_url_is_kept() {
        assert_eq!(
            safe_redirect_target(Some("https://erp.example.edu/info/"), HOST, "/"),
            "https://erp.example.edu/info/"
        );
        assert_eq!(
            safe_redirect_target(Some("http://localhost:8000/info/"), Some("localhost:8000"), "/"),
            "http://localhost:8000/info/"
        );
    }

    #[test]
    fn test_foreign_hosts_are_rejected() {
        for next in [
            "https://evil.example/",
            "//evil.example/",
            "/\\evil.example/",
            "\\\\evil.example",
            "javascript:alert(1)",
            "ftp://erp.example.edu/",
            "/in\nfo/",
        ] {
            assert_eq!(safe_redirect_target(Some(next), HOST, "/"), "/", "{next:?} should be rejected");
        }
    }

    #[test]
    fn test_absolute_url_without_host_header_is_rejected() {
        assert_eq!(safe_redirect_target(Some("https://erp.example.edu/"), None, "/"), "/");
    }
}
