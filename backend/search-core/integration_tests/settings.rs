use models::Theme;
use search_core::error::SettingsError;
use search_core::{FileSettingsStore, Settings, SettingsStore};

use tempfile::TempDir;

/// **VALUE**: Verifies a missing settings file loads as defaults.
#[test]
fn given_empty_dir_when_load_then_defaults() {
    let dir = TempDir::new().unwrap();
    let store = FileSettingsStore::new(dir.path());

    let settings = store.load().expect("missing file is not an error");

    assert_eq!(settings, Settings::default());
}

/// **VALUE**: Verifies save then load round-trips override and theme.
///
/// **BUG THIS CATCHES**: Would catch the override being skipped on serialization.
#[test]
fn given_saved_settings_when_reloaded_then_values_persist() {
    let dir = TempDir::new().unwrap();
    let store = FileSettingsStore::new(dir.path().join("nested"));

    let mut settings = Settings::default();
    settings.credential.user_override = Some("AIzaPersisted123".to_string());
    settings.ui.theme = Theme::Dark;
    store.save(&settings).expect("save should succeed");

    let reopened = FileSettingsStore::new(dir.path().join("nested"));
    let loaded = reopened.load().expect("load should succeed");

    assert_eq!(loaded, settings);
    assert!(!reopened.dir().join("settings.json.tmp").exists());
}

/// **VALUE**: Verifies a corrupt file is an error, not silently replaced by defaults.
///
/// **WHY THIS MATTERS**: Falling back would drop the user's override without telling them.
#[test]
fn given_corrupt_file_when_load_then_parse_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("settings.json"), "{ not json").unwrap();
    let store = FileSettingsStore::new(dir.path());

    let result = store.load();

    assert!(matches!(result, Err(SettingsError::ParseError { .. })));
}

/// **VALUE**: Verifies update persists only the mutated field.
#[test]
fn given_existing_settings_when_update_then_other_fields_kept() {
    let dir = TempDir::new().unwrap();
    let store = FileSettingsStore::new(dir.path());

    let mut settings = Settings::default();
    settings.credential.user_override = Some("AIzaKeepMe12345".to_string());
    store.save(&settings).unwrap();

    store
        .update(&mut |settings: &mut Settings| settings.ui.theme = Theme::Light)
        .expect("update should succeed");

    let loaded = store.load().unwrap();
    assert_eq!(loaded.ui.theme, Theme::Light);
    assert_eq!(
        loaded.credential.user_override.as_deref(),
        Some("AIzaKeepMe12345")
    );
}

/// **VALUE**: Verifies a corrupt file is replaced by defaults plus the requested change.
///
/// **WHY THIS MATTERS**: Clearing the override or picking a theme is how a user
/// gets out of a damaged settings file. Failing there leaves no way back.
///
/// **BUG THIS CATCHES**: Would catch `update_or_reset` propagating the parse error.
#[test]
fn given_corrupt_file_when_update_or_reset_then_defaults_with_change_written() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("settings.json"), "{ not json").unwrap();
    let store = FileSettingsStore::new(dir.path());

    let saved = store
        .update_or_reset(&mut |settings: &mut Settings| settings.ui.theme = Theme::Dark)
        .expect("corrupt file should be replaced");

    assert_eq!(saved.ui.theme, Theme::Dark);
    assert_eq!(saved.credential.user_override, None);
    assert_eq!(store.load().unwrap(), saved);
}

/// **VALUE**: Verifies a readable file is updated in place, not reset.
///
/// **BUG THIS CATCHES**: Would catch resetting on every call and losing the override.
#[test]
fn given_valid_file_when_update_or_reset_then_other_fields_kept() {
    let dir = TempDir::new().unwrap();
    let store = FileSettingsStore::new(dir.path());
    let mut settings = Settings::default();
    settings.credential.user_override = Some("AIzaKeepMe12345".to_string());
    store.save(&settings).unwrap();

    store
        .update_or_reset(&mut |settings: &mut Settings| settings.ui.theme = Theme::Light)
        .unwrap();

    let loaded = store.load().unwrap();
    assert_eq!(loaded.ui.theme, Theme::Light);
    assert_eq!(
        loaded.credential.user_override.as_deref(),
        Some("AIzaKeepMe12345")
    );
}
