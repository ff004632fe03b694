mod common;

use common::config_test_utils::with_config_env;
use updrop::load_config;

#[test]
fn defaults_apply_with_empty_file() {
    with_config_env("", || {
        let config = load_config().expect("load config");
        assert!(config.accept.is_none());
        assert!(config.max_file_size.is_none());
        assert!(config.max_total_size.is_none());
        assert!(!config.multiple);
        assert!(!config.no_thumbnails);
        assert!(!config.disable);
    });
}

#[test]
fn file_overrides_defaults() {
    with_config_env(
        r#"
        accept = "image/*,.pdf"
        max_file_size = 1048576
        multiple = true
        "#,
        || {
            let config = load_config().expect("load config");
            assert_eq!(config.accept.as_deref(), Some("image/*,.pdf"));
            assert_eq!(config.max_file_size, Some(1_048_576));
            assert!(config.multiple);
        },
    );
}

#[test]
fn env_overrides_file() {
    with_config_env(
        r#"
        max_file_size = 1000
        "#,
        || {
            std::env::set_var("UPDROP_MAX_FILE_SIZE", "2000");
            let config = load_config().expect("load config");
            assert_eq!(config.max_file_size, Some(2000));
        },
    );
}

#[test]
fn disable_reads_from_env() {
    with_config_env("", || {
        std::env::set_var("UPDROP_DISABLE", "true");
        let config = load_config().expect("load config");
        assert!(config.disable);
    });
}
