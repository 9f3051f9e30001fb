//! Generation settings sent along with every provider request.

use bon::Builder;
use serde::{Deserialize, Serialize};

/// Sampling settings for a provider call.
#[derive(Debug, Clone, Copy, Builder, Serialize, Deserialize, PartialEq)]
pub struct GenerationSettings {
    #[builder(default = 0.8)]
    pub temperature: f64,
    #[builder(default = 300)]
    pub max_tokens: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}
