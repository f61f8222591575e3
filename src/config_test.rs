use super::*;

/// # Safety
/// Tests must run with `--test-threads=1` to avoid env races.
unsafe fn clear_nexus_env() {
    unsafe {
        std::env::remove_var("NEXUS_API_URL");
        std::env::remove_var("NEXUS_AUTH_TOKEN");
        std::env::remove_var("NEXUS_REQUEST_TIMEOUT_SECS");
        std::env::remove_var("NEXUS_CONNECT_TIMEOUT_SECS");
    }
}

#[test]
fn from_env_defaults() {
    unsafe { clear_nexus_env() };

    let cfg = ApiConfig::from_env().unwrap();
    assert_eq!(cfg, ApiConfig::default());
    assert_eq!(cfg.base_url, DEFAULT_API_URL);
    assert_eq!(cfg.auth_token, None);
    assert_eq!(
        cfg.timeouts,
        Timeouts { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    );
}

#[test]
fn from_env_parses_overrides() {
    unsafe {
        clear_nexus_env();
        std::env::set_var("NEXUS_API_URL", "https://nexus.example.test/api/");
        std::env::set_var("NEXUS_AUTH_TOKEN", "tok-123");
        std::env::set_var("NEXUS_REQUEST_TIMEOUT_SECS", "45");
        std::env::set_var("NEXUS_CONNECT_TIMEOUT_SECS", "3");
    }

    let cfg = ApiConfig::from_env().unwrap();
    assert_eq!(cfg.base_url, "https://nexus.example.test/api");
    assert_eq!(cfg.auth_token.as_deref(), Some("tok-123"));
    assert_eq!(cfg.timeouts, Timeouts { request_secs: 45, connect_secs: 3 });
    assert_eq!(cfg.timeouts.request(), Duration::from_secs(45));

    unsafe { clear_nexus_env() };
}

#[test]
fn from_env_rejects_bad_timeout() {
    unsafe {
        clear_nexus_env();
        std::env::set_var("NEXUS_REQUEST_TIMEOUT_SECS", "soon");
    }

    let err = ApiConfig::from_env().unwrap_err().to_string();
    assert!(err.contains("NEXUS_REQUEST_TIMEOUT_SECS"), "{err}");

    unsafe { clear_nexus_env() };
}

#[test]
fn from_env_rejects_zero_timeout() {
    unsafe {
        clear_nexus_env();
        std::env::set_var("NEXUS_CONNECT_TIMEOUT_SECS", "0");
    }

    let err = ApiConfig::from_env().unwrap_err().to_string();
    assert!(err.contains("greater than zero"), "{err}");

    unsafe { clear_nexus_env() };
}

#[test]
fn empty_token_means_no_auth() {
    let cfg = ApiConfig::new(DEFAULT_API_URL, Some("  ".into()), Timeouts::default()).unwrap();
    assert_eq!(cfg.auth_token, None);
}

#[test]
fn non_http_url_is_rejected() {
    let err = ApiConfig::new("localhost:5000", None, Timeouts::default()).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { var: "NEXUS_API_URL", .. }));
}

#[test]
fn multiple_trailing_slashes_are_trimmed() {
    let cfg = ApiConfig::new("http://127.0.0.1:8080//", None, Timeouts::default()).unwrap();
    assert_eq!(cfg.base_url, "http://127.0.0.1:8080");
}
