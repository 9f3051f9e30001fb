//! Configuration system (layered: defaults > TOML file > env).

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Result, VariantlyError};
use crate::provider::ProviderId;

const DEFAULT_CONFIG_FILE: &str = "variantly.toml";

/// Accepted token lifetimes, one hour to ten years.
pub const TOKEN_TTL_HOURS_RANGE: std::ops::RangeInclusive<i64> = 1..=87_600;

/// Top-level service configuration.
///
/// Resolution order (later wins):
/// 1. Built-in defaults
/// 2. TOML file (`VARIANTLY_CONFIG`, or `./variantly.toml` when present)
/// 3. Environment variables (a `.env` file is loaded first if present)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub providers: ProvidersConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    pub gemini: ProviderSettings,
    pub openai: ProviderSettings,
    /// Upper bound for a single provider call.
    pub timeout_secs: u64,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            gemini: ProviderSettings::default(),
            openai: ProviderSettings::default(),
            timeout_secs: 30,
        }
    }
}

impl ProvidersConfig {
    pub fn settings(&self, provider: ProviderId) -> &ProviderSettings {
        match provider {
            ProviderId::Gemini => &self.gemini,
            ProviderId::OpenAi => &self.openai,
        }
    }

    fn settings_mut(&mut self, provider: ProviderId) -> &mut ProviderSettings {
        match provider {
            ProviderId::Gemini => &mut self.gemini,
            ProviderId::OpenAi => &mut self.openai,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Credentials and overrides for one provider.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
}

impl fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl ProviderSettings {
    /// The API key, if one is set and not blank.
    ///
    /// A provider without a credential is treated as absent.
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub jwt_secret: Option<String>,
    pub token_ttl_hours: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            token_ttl_hours: 24 * 7,
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "<redacted>"))
            .field("token_ttl_hours", &self.token_ttl_hours)
            .finish()
    }
}

impl AuthConfig {
    /// The configured signing secret, or a random one for this process.
    ///
    /// Tokens signed with an ephemeral secret stop verifying after a restart.
    pub fn signing_secret(&self) -> String {
        match self.jwt_secret.as_deref().filter(|s| !s.trim().is_empty()) {
            Some(secret) => secret.to_string(),
            None => {
                tracing::warn!("JWT_SECRET is not set; issuing tokens with an ephemeral secret");
                format!("{}{}", uuid::Uuid::new_v4(), uuid::Uuid::new_v4())
            }
        }
    }
}

impl AppConfig {
    /// Load the full layered configuration from the process environment.
    pub fn load() -> Result<Self> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error

        let file = std::env::var("VARIANTLY_CONFIG")
            .ok()
            .map(PathBuf::from)
            .or_else(|| {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                default.exists().then_some(default)
            });

        let base = match file {
            Some(path) => {
                tracing::info!(path = %path.display(), "loading configuration file");
                Self::from_file(&path)?
            }
            None => Self::default(),
        };

        base.with_env(|key| std::env::var(key).ok())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Overlay values from an environment lookup.
    ///
    /// Aliases are applied in table order, so the later name wins when both are set.
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let key_mappings = [
            ("GOOGLE_API_KEY", ProviderId::Gemini),
            ("GEMINI_API_KEY", ProviderId::Gemini),
            ("OPENAI_API_KEY", ProviderId::OpenAi),
        ];
        for (env_var, provider) in key_mappings {
            if let Some(key) = lookup(env_var) {
                self.providers.settings_mut(provider).api_key = Some(key);
            }
        }

        let model_mappings = [
            ("GEMINI_MODEL", ProviderId::Gemini),
            ("OPENAI_MODEL", ProviderId::OpenAi),
        ];
        for (env_var, provider) in model_mappings {
            if let Some(model) = lookup(env_var) {
                self.providers.settings_mut(provider).model = Some(model);
            }
        }

        let url_mappings = [
            ("GEMINI_BASE_URL", ProviderId::Gemini),
            ("OPENAI_BASE_URL", ProviderId::OpenAi),
        ];
        for (env_var, provider) in url_mappings {
            if let Some(url) = lookup(env_var) {
                self.providers.settings_mut(provider).base_url = Some(url);
            }
        }

        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = parse_var("PORT", &port)?;
        }
        if let Some(secs) = lookup("PROVIDER_TIMEOUT_SECS") {
            self.providers.timeout_secs = parse_var("PROVIDER_TIMEOUT_SECS", &secs)?;
        }
        if let Some(secret) = lookup("JWT_SECRET") {
            self.auth.jwt_secret = Some(secret);
        }
        if let Some(hours) = lookup("JWT_EXPIRES_IN_HOURS") {
            self.auth.token_ttl_hours = parse_var("JWT_EXPIRES_IN_HOURS", &hours)?;
        }

        if self.providers.timeout_secs == 0 {
            return Err(VariantlyError::Configuration(
                "PROVIDER_TIMEOUT_SECS must be greater than zero".into(),
            ));
        }
        if !TOKEN_TTL_HOURS_RANGE.contains(&self.auth.token_ttl_hours) {
            return Err(VariantlyError::Configuration(format!(
                "JWT_EXPIRES_IN_HOURS must be between {} and {}, got {}",
                TOKEN_TTL_HOURS_RANGE.start(),
                TOKEN_TTL_HOURS_RANGE.end(),
                self.auth.token_ttl_hours
            )));
        }

        Ok(self)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| VariantlyError::Configuration(format!("{name} has an invalid value: {raw}")))
}
