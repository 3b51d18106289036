use super::*;
use tempfile::TempDir;

#[test]
fn test_default_config_is_valid() {
    let config = Config::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.parsing.fallback_language, "javascript");
    assert_eq!(config.parsing.max_source_bytes, 1_048_576);
    assert_eq!(config.sizing.base_size, 10);
    assert_eq!(config.sizing.degree_multiplier, 5);
}

#[test]
fn test_config_roundtrip_through_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");

    let mut config = Config::default();
    config.sizing.base_size = 20;
    config
        .palette
        .overrides
        .insert("class_declaration".to_string(), "#123456".to_string());
    config.save(&path).unwrap();

    let loaded = Config::from_file(&path).unwrap();
    assert_eq!(loaded.sizing.base_size, 20);
    assert_eq!(
        loaded.palette.overrides.get("class_declaration"),
        Some(&"#123456".to_string())
    );
}

#[test]
fn test_config_file_not_found() {
    let err = Config::from_file(Path::new("/nonexistent/config.toml")).unwrap_err();
    assert!(matches!(
        err,
        GraphError::Config(ConfigError::FileNotFound(_))
    ));
}

#[test]
fn test_config_invalid_toml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is [not toml").unwrap();

    let err = Config::from_file(&path).unwrap_err();
    assert!(matches!(
        err,
        GraphError::Config(ConfigError::ParseFailed(_))
    ));
}

#[test]
fn test_partial_config_fills_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[sizing]\nbase_size = 15\n").unwrap();

    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.sizing.base_size, 15);
    // Untouched sections keep their defaults
    assert_eq!(config.sizing.degree_multiplier, 5);
    assert_eq!(config.parsing.fallback_language, "javascript");
}

#[test]
fn test_empty_config_file_is_all_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "").unwrap();

    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.parsing.fallback_language, "javascript");
    assert_eq!(config.sizing.base_size, 10);
    assert_eq!(config.palette.neutral_color, "#95a5a6");
}

#[test]
fn test_validate_rejects_zero_multiplier() {
    let mut config = Config::default();
    config.sizing.degree_multiplier = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_rejects_empty_fallback_language() {
    let mut config = Config::default();
    config.parsing.fallback_language = "  ".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_rejects_bad_color() {
    let mut config = Config::default();
    config.palette.neutral_color = "red".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config
        .palette
        .overrides
        .insert("class_declaration".to_string(), "#12345z".to_string());
    assert!(config.validate().is_err());
}

#[test]
fn test_hex_color_forms() {
    assert!(is_hex_color("#abc"));
    assert!(is_hex_color("#AABBCC"));
    assert!(!is_hex_color("abc"));
    assert!(!is_hex_color("#ab"));
    assert!(!is_hex_color("#ggg"));
}
