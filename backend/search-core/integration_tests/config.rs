use models::Locale;
use search_core::ServiceConfig;
use search_core::error::ConfigError;

use tempfile::TempDir;

/// **VALUE**: Verifies a missing config file yields defaults.
#[test]
fn given_empty_dir_when_load_then_defaults() {
    let dir = TempDir::new().unwrap();

    let config = ServiceConfig::load(dir.path()).expect("missing file is not an error");

    assert_eq!(config, ServiceConfig::default());
}

/// **VALUE**: Verifies `config/` takes precedence over the directory root.
#[test]
fn given_files_in_both_locations_when_load_then_config_subdir_wins() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("config")).unwrap();
    std::fs::write(
        dir.path().join("config").join("gemini-search.toml"),
        "locale = \"en\"\nweather_cache_ttl_secs = 60\n",
    )
    .unwrap();
    std::fs::write(dir.path().join("gemini-search.toml"), "locale = \"ja\"\n").unwrap();

    let config = ServiceConfig::load(dir.path()).unwrap();

    assert_eq!(config.locale, Locale::En);
    assert_eq!(config.weather_cache_ttl_secs, 60);
}

/// **VALUE**: Verifies malformed TOML and invalid values are errors.
///
/// **BUG THIS CATCHES**: Would catch a broken file silently falling back to defaults
/// and sending traffic to the wrong model.
#[test]
fn given_bad_files_when_load_then_errors() {
    let malformed = TempDir::new().unwrap();
    std::fs::write(malformed.path().join("gemini-search.toml"), "locale = ").unwrap();
    assert!(matches!(
        ServiceConfig::load(malformed.path()),
        Err(ConfigError::ParseError { .. })
    ));

    let invalid = TempDir::new().unwrap();
    std::fs::write(invalid.path().join("gemini-search.toml"), "temperature = 0.7\n").unwrap();
    assert!(matches!(
        ServiceConfig::load(invalid.path()),
        Err(ConfigError::ValidationError { .. })
    ));
}
