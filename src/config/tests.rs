//! Configuration tests
//!
//! These guard the file format: every field written by `to_toml` must parse
//! back into the same resolved config.

use super::*;
use std::collections::HashMap;
use tracing::level_filters::LevelFilter;

fn no_env(_: &str) -> Option<String> {
    None
}

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let toml_str = config.to_toml();

    let parsed = parse_file_config(&toml_str);
    assert!(
        parsed.is_ok(),
        "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );

    assert_eq!(Config::resolve(parsed.unwrap(), no_env), config);
}

#[test]
fn test_config_roundtrip_customized() {
    let mut config = Config::default();
    config.api_url = "http://localhost:3000/v1".to_string();
    config.theme = "Deck Light".to_string();
    config.catalog.order_by = "cost".to_string();
    config.catalog.page_size = 50;
    config.catalog.types = "action".to_string();
    config.catalog.debounce_ms = 250;
    config.catalog.scroll_threshold = 900;
    config.logging.level = LevelFilter::DEBUG;
    config.logging.file_enabled = true;
    config.logging.file_dir = PathBuf::from("C:\\logs\\deck \"view\"");
    config.logging.file_rotation = LogRotation::Hourly;

    let parsed = parse_file_config(&config.to_toml()).unwrap();
    assert_eq!(Config::resolve(parsed, no_env), config);
}

// ─────────────────────────────────────────────────────────────────────────────
// Precedence
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_empty_file_uses_defaults() {
    let parsed = parse_file_config("").unwrap();
    assert_eq!(Config::resolve(parsed, no_env), Config::default());
}

#[test]
fn test_env_overrides_file() {
    let parsed = parse_file_config(
        r#"
api_url = "http://from-file"
theme = "Terminal"
"#,
    )
    .unwrap();

    let config = Config::resolve(
        parsed,
        env_from(&[
            ("DECKVIEW_API_URL", "http://from-env"),
            ("DECKVIEW_NO_TUI", "1"),
        ]),
    );

    assert_eq!(config.api_url, "http://from-env");
    assert_eq!(config.theme, "Terminal");
    assert!(!config.enable_tui);
}

#[test]
fn test_no_tui_flag_values() {
    for (value, expected) in [("1", false), ("true", false), ("TRUE", false), ("0", true)] {
        let config = Config::resolve(
            FileConfig::default(),
            env_from(&[("DECKVIEW_NO_TUI", value)]),
        );
        assert_eq!(config.enable_tui, expected, "DECKVIEW_NO_TUI={}", value);
    }
}

#[test]
fn test_partial_sections_fill_defaults() {
    let parsed = parse_file_config(
        r#"
[catalog]
types = "support"

[logging]
file_rotation = "weekly"
"#,
    )
    .unwrap();
    let config = Config::resolve(parsed, no_env);

    assert_eq!(config.catalog.types, "support");
    assert_eq!(config.catalog.page_size, 20);
    assert_eq!(config.catalog.debounce_ms, 500);
    // Unknown rotation falls back to daily
    assert_eq!(config.logging.file_rotation, LogRotation::Daily);
}

#[test]
fn test_bad_logging_values_fall_back() {
    let parsed = parse_file_config(
        r#"
[logging]
level = "chatty"
file_dir = ""
file_prefix = "  "
"#,
    )
    .unwrap();
    let logging = Config::resolve(parsed, no_env).logging;

    assert_eq!(logging, LoggingConfig::default());
    assert_eq!(logging.filter_directive(), "deckview=info");
}

#[test]
fn test_level_names_are_case_insensitive() {
    let parsed = parse_file_config("[logging]\nlevel = \"WARN\"\n").unwrap();
    let logging = Config::resolve(parsed, no_env).logging;

    assert_eq!(logging.level, LevelFilter::WARN);
    assert_eq!(logging.filter_directive(), "deckview=warn");
}

#[test]
fn test_file_appender_only_when_enabled() {
    let dir = std::env::temp_dir().join(format!("deckview-logs-{}", std::process::id()));
    let mut logging = LoggingConfig {
        file_dir: dir.join("nested"),
        file_rotation: LogRotation::Never,
        ..LoggingConfig::default()
    };

    assert!(logging.open_file_appender().unwrap().is_none());

    logging.file_enabled = true;
    assert!(logging.open_file_appender().unwrap().is_some());
    assert!(dir.join("nested").is_dir());

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_zero_page_size_is_rejected() {
    let parsed = parse_file_config("[catalog]\npage_size = 0\n").unwrap();
    assert_eq!(Config::resolve(parsed, no_env).catalog.page_size, 20);
}

#[test]
fn test_invalid_file_is_an_error() {
    assert!(parse_file_config("api_url = ").is_err());
    assert!(parse_file_config("[catalog]\npage_size = \"many\"\n").is_err());
}

#[test]
fn test_load_file_config_reports_path() {
    let dir = std::env::temp_dir().join(format!("deckview-config-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.toml");
    std::fs::write(&path, "theme = [").unwrap();

    let err = Config::load_file_config(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("config.toml"));

    let missing = Config::load_file_config(&dir.join("absent.toml")).unwrap();
    assert!(missing.api_url.is_none());

    std::fs::remove_dir_all(&dir).unwrap();
}

// ─────────────────────────────────────────────────────────────────────────────
// Controller wiring
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_default_catalog_matches_listing_defaults() {
    let options = CatalogConfig::default().controller_options();
    assert_eq!(options.defaults, crate::catalog::controller::default_filters());
    assert_eq!(options.debounce, std::time::Duration::from_millis(500));
    assert_eq!(options.scroll_threshold, 600);
}

#[test]
fn test_configured_defaults_keep_listing_shape() {
    let catalog = CatalogConfig {
        order_by: "cost".to_string(),
        page_size: 50,
        ..CatalogConfig::default()
    };

    assert_eq!(
        crate::catalog::query::format_query(&catalog.default_filters()),
        "?orderBy=cost&page=1&pageSize=50&types=creature"
    );
}
