// Commands run end to end against a mock Generative Language endpoint,
// with real config and settings files in a temporary directory.

use gemini_search::app::App;
use gemini_search::cli::{Command, KeyCommand, ThemeArg, WeatherArgs};
use gemini_search::commands::{CommandOutput, KeyStatus, run};
use gemini_search::error::AppError;

use models::{ErrorKind, Theme};
use search_core::SettingsStore;

use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const AMBIENT_KEY: &str = "AIzaAmbientKey0123456";

fn text_response(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }]
    })
}

async fn mount(server: &MockServer, model: &str, status: u16, body: Value) {
    Mock::given(method("POST"))
        .and(path(format!("/v1beta/models/{}:generateContent", model)))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

/// Config dir whose `gemini-search.toml` points at `server`.
fn config_dir_for(server: &MockServer) -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("gemini-search.toml"),
        format!("base_url = \"{}\"\nlocale = \"en\"\n", server.uri()),
    )
    .unwrap();
    dir
}

fn app_for(dir: &TempDir, ambient: Option<&str>) -> App {
    App::with_ambient_default(dir.path(), None, ambient.map(str::to_string))
        .expect("app should build")
}

/// **VALUE**: Verifies `search` prints the filtered results.
#[tokio::test]
async fn given_search_command_when_model_answers_then_results_output() {
    // GIVEN: A model answer with one valid and one invalid entry
    let server = MockServer::start().await;
    let answer = r#"{"results":[{"title":"Rust","url":"https://www.rust-lang.org","summary":"A language"},{"title":"Bad","url":"not a url","summary":"x"}]}"#;
    mount(&server, "gemini-3-pro-preview", 200, text_response(answer)).await;
    let dir = config_dir_for(&server);
    let app = app_for(&dir, Some(AMBIENT_KEY));

    // WHEN: Running the search command
    let output = run(&app, Command::Search { query: "rust".to_string() })
        .await
        .expect("search should succeed");

    // THEN: Only the valid entry is printed
    let CommandOutput::Search(response) = output else {
        panic!("expected search output");
    };
    assert_eq!(response.results.len(), 1);
    assert_eq!(response.results[0].url, "https://www.rust-lang.org");
}

/// **VALUE**: Verifies a missing credential surfaces as a query failure.
///
/// **WHY THIS MATTERS**: Exit code 1 plus the `unauthenticated` kind is how a
/// script learns it has to run `key set`.
#[tokio::test]
async fn given_no_credential_when_searching_then_unauthenticated_query_error() {
    let server = MockServer::start().await;
    let dir = config_dir_for(&server);
    let app = app_for(&dir, None);

    let err = run(&app, Command::Search { query: "rust".to_string() })
        .await
        .expect_err("search without a key should fail");

    match &err {
        AppError::Query { error } => assert_eq!(error.kind, ErrorKind::Unauthenticated),
        other => panic!("expected query error, got {other:?}"),
    }
    assert_eq!(err.exit_code(), 1);
}

/// **VALUE**: Verifies `weather` backfills and caches through the real settings file.
///
/// **BUG THIS CATCHES**: Would catch the cache being written somewhere other than
/// the config directory, so every call hits the model.
#[tokio::test]
async fn given_weather_command_twice_when_cached_then_single_model_call() {
    // GIVEN: A model that answers exactly once
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-3-flash-preview:generateContent"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(text_response(r#"{"location":"Tokyo","temp":"21°C"}"#)),
        )
        .expect(1)
        .mount(&server)
        .await;
    let dir = config_dir_for(&server);
    let app = app_for(&dir, Some(AMBIENT_KEY));
    let args = WeatherArgs {
        lat: 35.68,
        lng: 139.69,
        no_cache: false,
    };

    // WHEN: Running weather twice at the same spot
    let first = run(&app, Command::Weather(args_copy(&args))).await.unwrap();
    let second = run(&app, Command::Weather(args_copy(&args))).await.unwrap();

    // THEN: Both print the same report, with sentinels for missing fields
    assert_eq!(first, second);
    let CommandOutput::Weather(info) = first else {
        panic!("expected weather output");
    };
    assert_eq!(info.location, "Tokyo");
    assert_eq!(info.temp, "21°C");
    assert!(!info.condition.is_empty());
    assert!(dir.path().join("settings.json").exists());
}

fn args_copy(args: &WeatherArgs) -> WeatherArgs {
    WeatherArgs {
        lat: args.lat,
        lng: args.lng,
        no_cache: args.no_cache,
    }
}

/// **VALUE**: Verifies `key set` stores only accepted keys and `key status`
/// reports the winning source.
#[tokio::test]
async fn given_key_set_when_probe_succeeds_then_override_becomes_source() {
    let server = MockServer::start().await;
    mount(&server, "gemini-3-flash-preview", 200, text_response("pong")).await;
    let dir = config_dir_for(&server);
    let app = app_for(&dir, Some(AMBIENT_KEY));

    let set = run(
        &app,
        Command::Key(KeyCommand::Set {
            candidate: Some("  AIzaUserOverride999  ".to_string()),
        }),
    )
    .await
    .unwrap();
    assert_eq!(set, CommandOutput::KeySet { accepted: true });
    assert_eq!(set.exit_code(), 0);

    let status = run(&app, Command::Key(KeyCommand::Status)).await.unwrap();
    assert_eq!(
        status,
        CommandOutput::KeyStatus(KeyStatus {
            source: Some("user_override".to_string()),
            override_set: true,
            ambient_default_available: true,
            credential_length: Some("AIzaUserOverride999".len()),
        })
    );

    let cleared = run(&app, Command::Key(KeyCommand::Clear)).await.unwrap();
    assert_eq!(cleared, CommandOutput::KeyCleared { cleared: true });
    assert_eq!(app.store().load().unwrap().credential.user_override, None);
}

/// **VALUE**: Verifies a rejected key leaves settings untouched and exits 1.
#[tokio::test]
async fn given_key_set_when_probe_rejected_then_not_stored() {
    let server = MockServer::start().await;
    mount(
        &server,
        "gemini-3-flash-preview",
        400,
        json!({"error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}}),
    )
    .await;
    let dir = config_dir_for(&server);
    let app = app_for(&dir, None);

    let output = run(
        &app,
        Command::Key(KeyCommand::Set {
            candidate: Some("AIzaWrongKey000".to_string()),
        }),
    )
    .await
    .unwrap();

    assert_eq!(output, CommandOutput::KeySet { accepted: false });
    assert_eq!(output.exit_code(), 1);
    assert!(!dir.path().join("settings.json").exists());
}

/// **VALUE**: Verifies the theme round-trips through the settings file.
#[tokio::test]
async fn given_theme_command_when_set_then_later_show_returns_it() {
    let server = MockServer::start().await;
    let dir = config_dir_for(&server);
    let app = app_for(&dir, None);

    let initial = run(&app, Command::Theme { theme: None }).await.unwrap();
    assert_eq!(initial, CommandOutput::Theme { theme: Theme::System });

    run(&app, Command::Theme { theme: Some(ThemeArg::Dark) })
        .await
        .unwrap();

    let reopened = app_for(&dir, None);
    let shown = run(&reopened, Command::Theme { theme: None }).await.unwrap();
    assert_eq!(shown, CommandOutput::Theme { theme: Theme::Dark });
}

/// **VALUE**: Verifies an invalid config file is a setup failure (exit code 2).
#[test]
fn given_invalid_config_when_building_app_then_config_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("gemini-search.toml"), "temperature = 0.9\n").unwrap();

    let err = App::with_ambient_default(dir.path(), None, None)
        .err()
        .expect("invalid temperature should fail");

    assert!(matches!(err, AppError::Config { .. }));
    assert_eq!(err.exit_code(), 2);
}

/// **VALUE**: Verifies `theme` and `key clear` recover a corrupt settings file.
///
/// **WHY THIS MATTERS**: These are the commands a user reaches for when the
/// settings file is damaged; they must not fail on it.
#[tokio::test]
async fn given_corrupt_settings_when_theme_set_and_key_clear_then_file_replaced() {
    let server = MockServer::start().await;
    let dir = config_dir_for(&server);
    std::fs::write(dir.path().join("settings.json"), "{ not json").unwrap();
    let app = app_for(&dir, None);

    let themed = run(&app, Command::Theme { theme: Some(ThemeArg::Light) })
        .await
        .expect("theme set should replace the corrupt file");
    assert_eq!(themed, CommandOutput::Theme { theme: Theme::Light });

    std::fs::write(dir.path().join("settings.json"), "{ not json").unwrap();
    let cleared = run(&app, Command::Key(KeyCommand::Clear))
        .await
        .expect("key clear should replace the corrupt file");
    assert_eq!(cleared, CommandOutput::KeyCleared { cleared: true });

    let settings = app.store().load().expect("file is valid again");
    assert_eq!(settings.credential.user_override, None);
}
