//! Integration tests for config loading and the template writer.

use std::path::PathBuf;

use flowscan_config::Config;
use flowscan_core::{EntityType, PatternCategory};

fn scratch_path(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("flowscan-config-test-{}", std::process::id()));
    let _ = std::fs::create_dir_all(&dir);
    dir.join(name)
}

#[test]
fn defaults_match_builtin_patterns() {
    let config = Config::default();
    let extractor = config.extractor();

    assert!(!config.scanner.case_sensitive);
    assert!(!config.scanner.whole_word);
    assert_eq!(extractor.patterns(PatternCategory::Date).len(), 4);
    assert_eq!(extractor.patterns(PatternCategory::Amount).len(), 3);
    assert_eq!(extractor.keyword_count(), 0);
}

#[test]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
fn missing_sections_fall_back_to_defaults() {
    let config: Config = serde_json::from_str(r#"{"scanner": {"case_sensitive": true}}"#)
        .expect("partial config should deserialize");

    assert!(config.scanner.case_sensitive);
    assert!((config.scanner.base_confidence - 0.8).abs() < f32::EPSILON);
    assert_eq!(config.extractor.date_patterns.len(), 4);
}

#[test]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
fn template_round_trips_through_a_file() {
    let path = scratch_path("template.json");
    let _ = std::fs::remove_file(&path);

    Config::write_template(&path).expect("template should be written");
    let config = Config::load_from(&path).expect("template should load");

    assert_eq!(config.extractor.keywords.len(), 1);
    assert_eq!(
        config.extractor.keywords[0].entity_type,
        EntityType::Organization
    );

    let entities = config.extractor().extract("Globex wired $40 to Acme Corp");
    assert!(entities.iter().any(|e| e.value == "Acme Corp"));
    assert!(entities.iter().any(|e| e.value == "$40"));

    assert!(Config::write_template(&path).is_err());
    let _ = std::fs::remove_file(&path);
}

#[test]
fn explicit_path_must_exist() {
    let path = scratch_path("does-not-exist.json");
    assert!(Config::resolve(Some(path.as_path())).is_err());
}

#[test]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
fn broken_pattern_in_config_is_reported_not_fatal() {
    let path = scratch_path("broken.json");
    std::fs::write(
        &path,
        r#"{"extractor": {"date_patterns": ["(\\d{4}"], "amount_patterns": []}}"#,
    )
    .expect("scratch file should be writable");

    let extractor = Config::load_from(&path).expect("config should load").extractor();
    assert_eq!(extractor.compile_errors().len(), 1);
    assert!(extractor.extract("2024 for $5").is_empty());
    let _ = std::fs::remove_file(&path);
}
