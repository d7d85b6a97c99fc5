//! Tests for the configuration module.
//!
//! Each test uses its own environment prefix so parallel tests do not see each
//! other's overrides.

use super::test_utils::TestFixture;
use crate::config::{
    global_config, init_global_config, search::SearchConfig, server::ServerConfig, ConfigLoader,
    LehuaConfig, LogConfig, Validate,
};
use crate::error::config::ConfigError;
use std::path::PathBuf;

/// Test that default configuration can be created and is valid.
#[test]
fn test_default_config_is_valid() {
    let config = LehuaConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.search.min_query_len, 2);
    assert_eq!(config.search.max_results, 10);
}

/// Test that configuration validation catches invalid values.
#[test]
fn test_config_validation() {
    let mut config = LehuaConfig::default();

    config.server.max_batch_size = 0;
    assert!(config.validate().is_err());

    config.server.max_batch_size = 16;
    config.search.max_results = 0;
    assert!(config.validate().is_err());

    config.search.max_results = 5;
    config.log.level = "loud".to_string();
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValidationError(msg)) if msg.contains("loud")
    ));

    config.log.level = "debug".to_string();
    assert!(config.validate().is_ok());
}

/// Test loading with no file yields the defaults.
#[test]
fn test_load_without_file() {
    let loader = ConfigLoader::new(None::<PathBuf>, "TEST_NOFILE");
    assert_eq!(loader.load().unwrap(), LehuaConfig::default());
}

/// Test loading configuration from a file.
#[test]
fn test_load_config_from_file() {
    let fixture = TestFixture::new().unwrap();
    let config_path = fixture
        .create_file(
            "lehua.toml",
            r#"
            [server]
            name = "directory"

            [search]
            max_results = 25
            seed_file = "users.json"

            [log]
            json = true
            "#,
        )
        .unwrap();

    let config = ConfigLoader::new(Some(&config_path), "TEST_FILE")
        .load()
        .unwrap();

    assert_eq!(config.server.name, "directory");
    assert_eq!(config.search.max_results, 25);
    assert_eq!(config.search.seed_file, Some(PathBuf::from("users.json")));
    assert!(config.log.json);

    // Other values should be defaults
    assert_eq!(config.search.min_query_len, 2);
    assert_eq!(config.server.max_batch_size, ServerConfig::default().max_batch_size);
    assert_eq!(config.log.level, LogConfig::default().level);
}

/// Test loading a JSON configuration file.
#[test]
fn test_load_json_config() {
    let fixture = TestFixture::new().unwrap();
    let config_path = fixture
        .create_file("lehua.json", r#"{"search": {"min_query_len": 3}}"#)
        .unwrap();

    let config = ConfigLoader::new(Some(&config_path), "TEST_JSON")
        .load()
        .unwrap();
    assert_eq!(config.search.min_query_len, 3);
}

/// Test loading configuration with environment variable overrides.
#[test]
fn test_env_var_override() {
    let mut fixture = TestFixture::new().unwrap();
    let config_path = fixture
        .create_file(
            "lehua.toml",
            r#"
            [search]
            max_results = 25
            "#,
        )
        .unwrap();

    fixture.set_env("TEST_ENV__SEARCH__MAX_RESULTS", "40");
    fixture.set_env("TEST_ENV__SERVER__NAME", "env-server");

    let config = ConfigLoader::new(Some(&config_path), "TEST_ENV")
        .load()
        .unwrap();

    assert_eq!(config.search.max_results, 40);
    assert_eq!(config.server.name, "env-server");
}

/// Test that an override producing an invalid value is rejected.
#[test]
fn test_env_var_validation() {
    let mut fixture = TestFixture::new().unwrap();
    fixture.set_env("TEST_BAD_ENV__SEARCH__MIN_QUERY_LEN", "0");

    let result = ConfigLoader::new(None::<PathBuf>, "TEST_BAD_ENV").load();
    assert!(matches!(
        result,
        Err(ConfigError::ValueOutOfRange { key, .. }) if key == "search.min_query_len"
    ));
}

/// Test that loading an invalid configuration file returns an error.
#[test]
fn test_load_invalid_config() {
    let fixture = TestFixture::new().unwrap();
    let config_path = fixture
        .create_file("invalid.toml", "[server\nname = lehua\"")
        .unwrap();

    let loader = ConfigLoader::new(Some(&config_path), "TEST_INVALID");
    assert!(matches!(loader.load(), Err(ConfigError::ParseError(_))));
}

/// Test missing files and unknown extensions.
#[test]
fn test_load_missing_or_unsupported_file() {
    let fixture = TestFixture::new().unwrap();

    let missing = fixture.temp_dir.path().join("missing.toml");
    assert!(matches!(
        ConfigLoader::new(Some(&missing), "TEST_MISSING").load(),
        Err(ConfigError::FileNotFound(path)) if path == missing
    ));

    let ini = fixture.create_file("lehua.ini", "name = x").unwrap();
    assert!(matches!(
        ConfigLoader::new(Some(&ini), "TEST_INI").load(),
        Err(ConfigError::ParseError(msg)) if msg.contains("Unsupported")
    ));
}

/// Test that the generated default file loads back unchanged.
#[test]
fn test_generated_config_loads() {
    let fixture = TestFixture::new().unwrap();
    let toml = toml::to_string_pretty(&LehuaConfig::default()).unwrap();
    let path = fixture.create_file("generated.toml", toml).unwrap();

    let config = ConfigLoader::new(Some(&path), "TEST_GENERATED")
        .load()
        .unwrap();
    assert_eq!(config, LehuaConfig::default());
}

/// Test that section validation is reachable on its own.
#[test]
fn test_section_validation_rules() {
    let search = SearchConfig {
        seed_file: Some(PathBuf::new()),
        ..SearchConfig::default()
    };
    assert!(search.validate().is_err());

    let server = ServerConfig {
        max_message_size: 8,
        ..ServerConfig::default()
    };
    assert!(server.validate().is_err());

    let server = ServerConfig {
        name: "  ".to_string(),
        ..ServerConfig::default()
    };
    assert!(server.validate().is_err());
}

/// Test that the first installed global configuration sticks.
#[test]
fn test_global_config_is_set_once() {
    let mut config = LehuaConfig::default();
    config.server.name = "global".to_string();
    init_global_config(config);

    let mut other = LehuaConfig::default();
    other.server.name = "ignored".to_string();
    init_global_config(other);

    assert_eq!(global_config().server.name, "global");
}
