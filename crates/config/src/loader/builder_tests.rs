//! Tests for the configuration loader builder.
//!
//! Invariants / Assumptions:
//! - Tests use `serial_test` and `temp_env` so environment mutations never leak.

use crate::loader::builder::ConfigLoader;
use crate::loader::env::env_var_or_none;
use crate::loader::error::ConfigError;
use secrecy::ExposeSecret;
use serial_test::serial;
use std::time::Duration;

const ALL_VARS: [&str; 3] = ["OATHNET_API_KEY", "OATHNET_BASE_URL", "OATHNET_TIMEOUT"];

fn cleared() -> Vec<(&'static str, Option<&'static str>)> {
    ALL_VARS.iter().map(|v| (*v, None)).collect()
}

#[test]
#[serial]
fn test_build_with_defaults() {
    temp_env::with_vars(cleared(), || {
        let config = ConfigLoader::new()
            .with_api_key("key-1".to_string())
            .build()
            .unwrap();

        assert_eq!(config.connection.base_url, "https://oathnet.org/api");
        assert_eq!(config.connection.timeout, Duration::from_secs(30));
        assert_eq!(config.auth.api_key.expose_secret(), "key-1");
    });
}

#[test]
#[serial]
fn test_missing_api_key_is_error() {
    temp_env::with_vars(cleared(), || {
        let result = ConfigLoader::new().from_env().unwrap().build();
        assert!(matches!(result, Err(ConfigError::MissingApiKey)));
    });
}

#[test]
fn test_blank_api_key_is_error() {
    let result = ConfigLoader::new().with_api_key("   ".to_string()).build();
    assert!(matches!(result, Err(ConfigError::MissingApiKey)));
}

#[test]
#[serial]
fn test_env_vars_are_applied() {
    temp_env::with_vars(
        [
            ("OATHNET_API_KEY", Some("env-key")),
            ("OATHNET_BASE_URL", Some("http://localhost:9000/api/")),
            ("OATHNET_TIMEOUT", Some("45")),
        ],
        || {
            let config = ConfigLoader::new().from_env().unwrap().build().unwrap();
            assert_eq!(config.auth.api_key.expose_secret(), "env-key");
            assert_eq!(config.connection.base_url, "http://localhost:9000/api");
            assert_eq!(config.connection.timeout, Duration::from_secs(45));
        },
    );
}

#[test]
#[serial]
fn test_overrides_win_over_env() {
    temp_env::with_vars(
        [
            ("OATHNET_API_KEY", Some("env-key")),
            ("OATHNET_BASE_URL", None),
            ("OATHNET_TIMEOUT", None),
        ],
        || {
            let config = ConfigLoader::new()
                .from_env()
                .unwrap()
                .with_api_key("cli-key".to_string())
                .build()
                .unwrap();
            assert_eq!(config.auth.api_key.expose_secret(), "cli-key");
        },
    );
}

#[test]
#[serial]
fn test_whitespace_env_vars_ignored() {
    temp_env::with_vars(
        [
            ("OATHNET_API_KEY", Some("   ")),
            ("OATHNET_BASE_URL", Some("")),
            ("OATHNET_TIMEOUT", None),
        ],
        || {
            assert!(env_var_or_none("OATHNET_API_KEY").is_none());
            let loader = ConfigLoader::new().from_env().unwrap();
            assert!(!loader.has_api_key());
        },
    );
}

#[test]
#[serial]
fn test_invalid_timeout_env_var() {
    temp_env::with_vars(
        [
            ("OATHNET_API_KEY", Some("k")),
            ("OATHNET_BASE_URL", None),
            ("OATHNET_TIMEOUT", Some("soon")),
        ],
        || {
            let result = ConfigLoader::new().from_env();
            match result {
                Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "OATHNET_TIMEOUT"),
                other => panic!("expected InvalidValue, got {:?}", other.err()),
            }
        },
    );
}

#[test]
fn test_zero_and_oversized_timeouts_rejected() {
    let zero = ConfigLoader::new()
        .with_api_key("k".to_string())
        .with_timeout(Duration::from_secs(0))
        .build();
    assert!(matches!(zero, Err(ConfigError::InvalidTimeout { .. })));

    let huge = ConfigLoader::new()
        .with_api_key("k".to_string())
        .with_timeout(Duration::from_secs(7200))
        .build();
    assert!(matches!(huge, Err(ConfigError::InvalidTimeout { .. })));
}

#[test]
fn test_base_url_validation() {
    let ftp = ConfigLoader::new()
        .with_api_key("k".to_string())
        .with_base_url("ftp://example.com".to_string())
        .build();
    assert!(matches!(ftp, Err(ConfigError::InvalidValue { .. })));

    let relative = ConfigLoader::new()
        .with_api_key("k".to_string())
        .with_base_url("oathnet.org/api".to_string())
        .build();
    assert!(matches!(relative, Err(ConfigError::InvalidValue { .. })));
}

#[test]
#[serial]
fn test_dotenv_disabled_skips_loading() {
    temp_env::with_var("DOTENV_DISABLED", Some("1"), || {
        assert!(ConfigLoader::new().load_dotenv().is_ok());
    });
}

#[test]
fn test_dotenv_parse_error_hides_contents() {
    let err = ConfigError::DotenvParse { error_index: 7 };
    let msg = err.to_string();
    assert!(msg.contains("position 7"));
    assert!(msg.contains("DOTENV_DISABLED"));
}
