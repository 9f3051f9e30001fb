//! Error types for Variantly.

pub mod unified;

pub use unified::ErrorCategory;

use thiserror::Error;

use crate::provider::ProviderId;

/// Why a single provider call failed.
#[derive(Error, Debug)]
pub enum ProviderFailure {
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("authentication rejected: {0}")]
    Authentication(String),

    #[error("rate limited: retry after {retry_after_ms:?}ms")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("timed out after {0}ms")]
    Timeout(u64),

    #[error("provider returned no content")]
    EmptyResponse,

    #[error("malformed response: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Request URLs may carry credentials (Gemini's `?key=`), so they never reach
/// the error text.
impl From<reqwest::Error> for ProviderFailure {
    fn from(error: reqwest::Error) -> Self {
        Self::Network(error.without_url())
    }
}

impl ProviderFailure {
    /// Attach the identity of the provider that produced this failure.
    pub fn tag(self, provider: ProviderId) -> ProviderError {
        ProviderError {
            provider,
            failure: self,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Network(_) => ErrorCategory::Network,
            Self::Authentication(_) => ErrorCategory::Authentication,
            Self::RateLimited { .. } => ErrorCategory::RateLimit,
            Self::Timeout(_) => ErrorCategory::Timeout,
            Self::Serialization(_) | Self::EmptyResponse => ErrorCategory::Serialization,
            Self::Api { status, .. } => match status {
                401 | 403 => ErrorCategory::Authentication,
                429 => ErrorCategory::RateLimit,
                500..=599 => ErrorCategory::Server,
                _ => ErrorCategory::Api,
            },
        }
    }
}

/// A provider call failure, tagged with the provider that failed.
///
/// The tag is set where the error is raised, so fallback routing never has to
/// guess which backend broke.
#[derive(Error, Debug)]
#[error("{provider} provider failed: {failure}")]
pub struct ProviderError {
    pub provider: ProviderId,
    #[source]
    pub failure: ProviderFailure,
}

impl ProviderError {
    pub fn category(&self) -> ErrorCategory {
        self.failure.category()
    }
}

/// Primary error type for all Variantly operations.
#[derive(Error, Debug)]
pub enum VariantlyError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl VariantlyError {
    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Configuration(_) | Self::ConfigParse(_) => ErrorCategory::Configuration,
            Self::Validation(_) => ErrorCategory::Validation,
            Self::NotFound(_) => ErrorCategory::NotFound,
            Self::Unauthorized(_) => ErrorCategory::Authentication,
            Self::Conflict(_) => ErrorCategory::Conflict,
            Self::Provider(e) => e.category(),
            Self::Serialization(_) => ErrorCategory::Serialization,
            Self::Io(_) | Self::Internal(_) => ErrorCategory::Unknown,
        }
    }
}

impl From<validator::ValidationErrors> for VariantlyError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(crate::util::validation::describe(&errors))
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, VariantlyError>;
