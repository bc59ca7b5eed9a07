use pointcut_config::{ConfigError, FilterConfig, LoggingConfig, PointcutConfig};
use tempfile::tempdir;

use pretty_assertions::assert_eq;

#[test]
fn empty_file_uses_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("pointcut.toml");
    std::fs::write(&path, "").unwrap();

    let config = PointcutConfig::load_from_path(&path).unwrap();
    assert_eq!(config, PointcutConfig::default());
    assert_eq!(config.logging.level, "info");
    assert!(!config.logging.json);
    assert!(config.filter.return_types.is_empty());
}

#[test]
fn loads_logging_and_filter_sections() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("pointcut.toml");
    std::fs::write(
        &path,
        r#"
[logging]
level = "warn,pointcut=debug"
json = true

[filter]
annotations = ["com.example.Traced", "com.example.Audited"]
return_types = ["int", "java.lang.String[]"]
"#,
    )
    .unwrap();

    let config = PointcutConfig::load_from_path(&path).unwrap();
    assert_eq!(
        config,
        PointcutConfig {
            logging: LoggingConfig {
                level: "warn,pointcut=debug".to_string(),
                json: true,
            },
            filter: FilterConfig {
                annotations: vec![
                    "com.example.Traced".to_string(),
                    "com.example.Audited".to_string(),
                ],
                return_types: vec!["int".to_string(), "java.lang.String[]".to_string()],
            },
        }
    );
}

#[test]
fn missing_file_reports_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing.toml");

    let err = PointcutConfig::load_from_path(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }), "{err:?}");
    assert!(err.to_string().contains("missing.toml"), "{err}");
}

#[test]
fn unknown_keys_are_rejected_without_echoing_input() {
    let err = PointcutConfig::load_from_str("[filter]\nreturn_type = \"secret-value\"\n")
        .unwrap_err();
    let ConfigError::Toml(message) = &err else {
        panic!("expected toml error, got {err:?}");
    };
    assert!(message.contains("unknown field"), "{message}");
    assert!(!message.contains("secret-value"), "{message}");
}

#[test]
fn wrong_value_type_is_a_toml_error() {
    let err = PointcutConfig::load_from_str("[logging]\njson = \"yes\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)), "{err:?}");
}
