//! Tests for configuration layering.

use std::collections::HashMap;
use std::io::Write;
use std::time::Duration;

use pretty_assertions::assert_eq;
use variantly::config::AppConfig;
use variantly::error::VariantlyError;
use variantly::provider::{ProviderId, ProviderSet};

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_without_file_or_env() {
    let config = AppConfig::default().with_env(env(&[])).unwrap();
    assert_eq!(config.server.bind_address(), "0.0.0.0:3001");
    assert_eq!(config.providers.timeout(), Duration::from_secs(30));
    assert_eq!(config.auth.token_ttl_hours, 168);
    assert!(config.providers.gemini.credential().is_none());
    assert!(config.providers.openai.credential().is_none());
}

#[test]
fn env_maps_keys_models_and_urls() {
    let config = AppConfig::default()
        .with_env(env(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_MODEL", "gpt-4o-mini"),
            ("GEMINI_BASE_URL", "http://localhost:9999/v1beta"),
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("PROVIDER_TIMEOUT_SECS", "5"),
            ("JWT_EXPIRES_IN_HOURS", "12"),
        ]))
        .unwrap();

    assert_eq!(config.providers.openai.credential(), Some("sk-test"));
    assert_eq!(config.providers.openai.model.as_deref(), Some("gpt-4o-mini"));
    assert_eq!(
        config.providers.settings(ProviderId::Gemini).base_url.as_deref(),
        Some("http://localhost:9999/v1beta")
    );
    assert_eq!(config.server.bind_address(), "127.0.0.1:8080");
    assert_eq!(config.providers.timeout(), Duration::from_secs(5));
    assert_eq!(config.auth.token_ttl_hours, 12);
}

#[test]
fn gemini_key_takes_precedence_over_google_key() {
    let config = AppConfig::default()
        .with_env(env(&[
            ("GOOGLE_API_KEY", "google-key"),
            ("GEMINI_API_KEY", "gemini-key"),
        ]))
        .unwrap();
    assert_eq!(config.providers.gemini.credential(), Some("gemini-key"));

    let config = AppConfig::default()
        .with_env(env(&[("GOOGLE_API_KEY", "google-key")]))
        .unwrap();
    assert_eq!(config.providers.gemini.credential(), Some("google-key"));
}

#[test]
fn blank_key_disables_provider() {
    let config = AppConfig::default()
        .with_env(env(&[("OPENAI_API_KEY", "   "), ("GEMINI_API_KEY", "g")]))
        .unwrap();
    assert!(config.providers.openai.credential().is_none());

    let set = ProviderSet::from_config(&config.providers);
    assert_eq!(set.ids(), vec![ProviderId::Gemini]);
}

#[test]
fn invalid_port_is_configuration_error() {
    let err = AppConfig::default()
        .with_env(env(&[("PORT", "not-a-port")]))
        .unwrap_err();
    assert!(matches!(err, VariantlyError::Configuration(_)));
    assert!(err.to_string().contains("PORT"));
}

#[test]
fn zero_timeout_is_rejected() {
    let err = AppConfig::default()
        .with_env(env(&[("PROVIDER_TIMEOUT_SECS", "0")]))
        .unwrap_err();
    assert!(matches!(err, VariantlyError::Configuration(_)));
}

#[test]
fn token_lifetime_must_be_within_bounds() {
    for raw in ["0", "-5", "87601", "100000000000"] {
        let err = AppConfig::default()
            .with_env(env(&[("JWT_EXPIRES_IN_HOURS", raw)]))
            .unwrap_err();
        assert!(matches!(err, VariantlyError::Configuration(_)), "{raw}");
        assert!(err.to_string().contains("JWT_EXPIRES_IN_HOURS"), "{raw}");
    }

    for (raw, hours) in [("1", 1), ("87600", 87_600)] {
        let config = AppConfig::default()
            .with_env(env(&[("JWT_EXPIRES_IN_HOURS", raw)]))
            .unwrap();
        assert_eq!(config.auth.token_ttl_hours, hours);
    }
}

#[test]
fn token_lifetime_from_file_is_checked() {
    let config = AppConfig::from_toml_str("[auth]\ntoken_ttl_hours = -1\n").unwrap();
    assert!(config.with_env(env(&[])).is_err());
}

#[test]
fn file_values_are_overridden_by_env() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[server]
port = 4000

[providers]
timeout_secs = 12

[providers.openai]
api_key = "file-key"
model = "gpt-4o"

[auth]
jwt_secret = "file-secret"
"#
    )
    .unwrap();

    let config = AppConfig::from_file(file.path())
        .unwrap()
        .with_env(env(&[("OPENAI_API_KEY", "env-key")]))
        .unwrap();

    assert_eq!(config.server.port, 4000);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.providers.timeout_secs, 12);
    assert_eq!(config.providers.openai.credential(), Some("env-key"));
    assert_eq!(config.providers.openai.model.as_deref(), Some("gpt-4o"));
    assert_eq!(config.auth.signing_secret(), "file-secret");
}

#[test]
fn malformed_file_is_parse_error() {
    let err = AppConfig::from_toml_str("[server\nport = ").unwrap_err();
    assert!(matches!(err, VariantlyError::ConfigParse(_)));
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = AppConfig::from_file(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, VariantlyError::Io(_)));
}

#[test]
fn debug_output_redacts_secrets() {
    let config = AppConfig::default()
        .with_env(env(&[
            ("OPENAI_API_KEY", "sk-very-secret"),
            ("JWT_SECRET", "jwt-very-secret"),
        ]))
        .unwrap();

    let rendered = format!("{config:?}");
    assert!(!rendered.contains("sk-very-secret"));
    assert!(!rendered.contains("jwt-very-secret"));
    assert!(rendered.contains("<redacted>"));
}

#[test]
fn missing_jwt_secret_generates_ephemeral_one() {
    let config = AppConfig::default().with_env(env(&[])).unwrap();
    let first = config.auth.signing_secret();
    let second = config.auth.signing_secret();
    assert!(!first.is_empty());
    assert_ne!(first, second);
}
