//! Property-based tests for configuration building.

use oathnet_config::ConfigLoader;
use proptest::prelude::*;
use std::time::Duration;

proptest! {
    #[test]
    fn base_url_never_ends_with_slash(segment in "[a-z]{1,12}", slashes in 0usize..4) {
        let raw = format!("https://example.com/{}{}", segment, "/".repeat(slashes));
        let config = ConfigLoader::new()
            .with_api_key("key".to_string())
            .with_base_url(raw)
            .build()
            .unwrap();
        prop_assert!(!config.connection.base_url.ends_with('/'));
        prop_assert!(config.connection.base_url.ends_with(&segment));
    }

    #[test]
    fn timeouts_within_bounds_are_accepted(secs in 1u64..=3600) {
        let config = ConfigLoader::new()
            .with_api_key("key".to_string())
            .with_timeout(Duration::from_secs(secs))
            .build()
            .unwrap();
        prop_assert_eq!(config.connection.timeout, Duration::from_secs(secs));
    }
}
