// These tests mutate process environment variables, so they run serially.

use search_core::config::resolve_config_dir;
use search_core::credential::{AMBIENT_ENV_VARS, ambient_default_from_env};
use search_core::CONFIG_DIR_ENV_VAR;

use std::path::PathBuf;

use serial_test::serial;

fn clear_ambient_vars() {
    for name in AMBIENT_ENV_VARS {
        // SAFETY: serialized by #[serial]; no other thread reads the environment.
        unsafe { std::env::remove_var(name) };
    }
}

fn set_var(name: &str, value: &str) {
    // SAFETY: serialized by #[serial]; no other thread reads the environment.
    unsafe { std::env::set_var(name, value) };
}

/// **VALUE**: Verifies the first non-empty variable wins, in documented order.
#[test]
#[serial]
fn given_several_env_vars_when_reading_ambient_default_then_first_non_empty_wins() {
    clear_ambient_vars();
    set_var("GEMINI_API_KEY", "   ");
    set_var("GOOGLE_API_KEY", "AIzaFromGoogleVar123");
    set_var("API_KEY", "AIzaFromApiKeyVar456");

    let value = ambient_default_from_env();

    assert_eq!(value.as_deref(), Some("AIzaFromGoogleVar123"));
    clear_ambient_vars();
}

/// **VALUE**: Verifies sample placeholders are skipped.
///
/// **WHY THIS MATTERS**: A copied `.env.example` would otherwise produce an
/// Unauthenticated error on every query instead of a clear "no key" state.
#[test]
#[serial]
fn given_placeholder_env_var_when_reading_ambient_default_then_skipped() {
    clear_ambient_vars();
    set_var("GEMINI_API_KEY", "your-api-key-here");
    set_var("API_KEY", "AIzaRealKey0000111");

    let value = ambient_default_from_env();

    assert_eq!(value.as_deref(), Some("AIzaRealKey0000111"));
    clear_ambient_vars();
}

/// **VALUE**: Verifies a configured key that merely contains `xxx` is kept.
///
/// **BUG THIS CATCHES**: Would catch substring placeholder matching silently
/// discarding a working key.
#[test]
#[serial]
fn given_real_key_with_xxx_fragment_when_reading_ambient_default_then_returned() {
    clear_ambient_vars();
    set_var("GEMINI_API_KEY", "AIzaSyQxxxR7u0Lm2Pw0Rt5Uv8Yz1Ab3Cd4");

    let value = ambient_default_from_env();

    assert_eq!(value.as_deref(), Some("AIzaSyQxxxR7u0Lm2Pw0Rt5Uv8Yz1Ab3Cd4"));
    clear_ambient_vars();
}

/// **VALUE**: Verifies no variables means no default.
#[test]
#[serial]
fn given_no_env_vars_when_reading_ambient_default_then_none() {
    clear_ambient_vars();

    assert!(ambient_default_from_env().is_none());
}

/// **VALUE**: Verifies the config directory environment override.
#[test]
#[serial]
fn given_config_dir_env_var_when_resolving_then_env_dir_used() {
    set_var(CONFIG_DIR_ENV_VAR, "/tmp/gemini-search-env-dir");

    let dir = resolve_config_dir(None).expect("env dir should resolve");

    assert_eq!(dir, PathBuf::from("/tmp/gemini-search-env-dir"));
    // SAFETY: serialized by #[serial].
    unsafe { std::env::remove_var(CONFIG_DIR_ENV_VAR) };
}
