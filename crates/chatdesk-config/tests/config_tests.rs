// SPDX-FileCopyrightText: 2026 Chatdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the chatdesk configuration system.

use chatdesk_config::diagnostic::ConfigError;
use chatdesk_config::model::ChatdeskConfig;
use chatdesk_config::{load_and_validate_path, load_and_validate_str, load_config_from_str};
use figment::Jail;
use serial_test::serial;

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_chatdesk_config() {
    let toml = r#"
[backend]
base_url = "https://support.example.com"
request_timeout_secs = 30
health_timeout_secs = 2

[session]
escalation_delay_ms = 500
reload_delay_ms = 2000
escalation_keywords = ["human", "agent"]

[sync]
enabled = false

[shell]
log_level = "debug"
strip_sources = false
feedback_address = "feedback@example.com"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.backend.base_url, "https://support.example.com");
    assert_eq!(config.backend.request_timeout_secs, 30);
    assert_eq!(config.backend.health_timeout_secs, 2);
    assert_eq!(config.session.escalation_delay_ms, 500);
    assert_eq!(config.session.reload_delay_ms, 2000);
    assert_eq!(config.session.escalation_keywords, vec!["human", "agent"]);
    assert!(!config.sync.enabled);
    assert_eq!(config.shell.log_level, "debug");
    assert!(!config.shell.strip_sources);
    assert_eq!(
        config.shell.feedback_address.as_deref(),
        Some("feedback@example.com")
    );
}

/// Missing optional sections use defaults without error.
#[test]
fn missing_optional_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config, ChatdeskConfig::default());
    assert_eq!(config.backend.base_url, "http://localhost:5000");
    assert_eq!(config.session.escalation_delay_ms, 1000);
    assert_eq!(config.session.reload_delay_ms, 5000);
    assert!(config.sync.enabled);
    assert_eq!(config.shell.log_level, "info");
    assert!(config.shell.strip_sources);
    assert!(config.shell.feedback_address.is_none());
}

/// Unexpected top-level section is rejected by deny_unknown_fields.
#[test]
fn deny_unknown_fields_at_top_level() {
    let toml = r#"
[trello]
api_key = "abc"
"#;

    let err = load_config_from_str(toml).expect_err("unknown top-level section should be rejected");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("trello"),
        "error should mention unknown field, got: {err_str}"
    );
}

/// Unknown key in [backend] comes back as an UnknownKey diagnostic with a suggestion.
#[test]
fn diagnostic_error_includes_unknown_key_and_suggestion() {
    let toml = r#"
[backend]
base_uri = "http://localhost:5000"
"#;

    let errors = load_and_validate_str(toml).expect_err("should produce errors");
    let has_unknown_key = errors.iter().any(|e| {
        matches!(e, ConfigError::UnknownKey { key, suggestion, valid_keys, .. } if {
            key == "base_uri"
                && suggestion.as_deref() == Some("base_url")
                && valid_keys.contains("request_timeout_secs")
        })
    });
    assert!(
        has_unknown_key,
        "should have UnknownKey error for 'base_uri' with suggestion 'base_url', got: {errors:?}"
    );
}

/// Invalid type (string where number expected) produces an InvalidType diagnostic.
#[test]
fn diagnostic_invalid_type() {
    let toml = r#"
[session]
reload_delay_ms = "five seconds"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject invalid type");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidType { .. })),
        "got: {errors:?}"
    );
}

/// Semantic validation runs after a successful parse.
#[test]
fn validation_rejects_scheme_less_base_url() {
    let toml = r#"
[backend]
base_url = "support.example.com"
"#;

    let errors = load_and_validate_str(toml).expect_err("scheme-less URL should fail");
    assert!(errors.iter().any(|e| {
        matches!(e, ConfigError::Validation { message } if message.contains("backend.base_url"))
    }));
}

/// ConfigError can be rendered using miette's graphical handler.
#[test]
fn config_error_renders_with_miette() {
    use miette::{Diagnostic, GraphicalReportHandler};

    let error = ConfigError::UnknownKey {
        key: "base_uri".to_string(),
        suggestion: Some("base_url".to_string()),
        valid_keys: "base_url, request_timeout_secs, health_timeout_secs".to_string(),
        span: None,
        src: None,
    };

    let help = error.help().expect("should have help text").to_string();
    assert!(help.contains("did you mean `base_url`"), "got: {help}");

    let mut buf = String::new();
    GraphicalReportHandler::new()
        .render_report(&mut buf, &error)
        .expect("should render without error");
    assert!(buf.contains("base_uri"));
}

/// CHATDESK_BACKEND_BASE_URL overrides backend.base_url from the local file.
#[test]
#[serial]
fn env_var_overrides_local_file() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "chatdesk.toml",
            r#"
[backend]
base_url = "http://from-file:5000"

[shell]
log_level = "warn"
"#,
        )?;
        jail.set_env("CHATDESK_BACKEND_BASE_URL", "https://from-env.example.com");
        jail.set_env("CHATDESK_SESSION_ESCALATION_DELAY_MS", "0");

        let config = chatdesk_config::load_config()?;
        assert_eq!(config.backend.base_url, "https://from-env.example.com");
        assert_eq!(config.session.escalation_delay_ms, 0);
        assert_eq!(config.shell.log_level, "warn");
        Ok(())
    });
}

/// An explicit config path is honored and validated.
#[test]
#[serial]
fn explicit_path_is_loaded_and_validated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.toml");
    std::fs::write(
        &path,
        r#"
[sync]
enabled = false
"#,
    )
    .unwrap();

    let config = load_and_validate_path(&path).expect("file should validate");
    assert!(!config.sync.enabled);

    std::fs::write(
        &path,
        r#"
[sync]
enabeld = false
"#,
    )
    .unwrap();
    let errors = load_and_validate_path(&path).expect_err("typo should fail");
    assert!(errors.iter().any(|e| matches!(
        e,
        ConfigError::UnknownKey { suggestion: Some(s), .. } if s == "enabled"
    )));
}

/// Missing config files are silently skipped.
#[test]
#[serial]
fn load_and_validate_defaults() {
    Jail::expect_with(|_jail| {
        let config = chatdesk_config::load_and_validate().expect("defaults should validate");
        assert_eq!(config.backend.base_url, "http://localhost:5000");
        Ok(())
    });
}
