//! Unified error classification.

use serde::Serialize;
use strum::Display;

/// Broad error category used for log fields and HTTP status mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ErrorCategory {
    Authentication,
    RateLimit,
    Network,
    Timeout,
    Server,
    Api,
    Configuration,
    Serialization,
    Validation,
    NotFound,
    Conflict,
    Unknown,
}

impl ErrorCategory {
    /// Whether an operation failing with this category may succeed if repeated.
    pub fn is_transient(self) -> bool {
        matches!(
            self,
            Self::RateLimit | Self::Network | Self::Timeout | Self::Server
        )
    }
}
