//! Text provider trait, provider table, and implementations.

pub mod http;

#[cfg(feature = "google")]
pub mod google;
#[cfg(feature = "openai")]
pub mod openai;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::config::ProvidersConfig;
use crate::error::ProviderError;
use crate::types::GenerationSettings;

/// Identity of an external text-generation backend.
///
/// Declaration order is the fallback priority: Gemini is tried first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ProviderId {
    Gemini,
    OpenAi,
}

impl ProviderId {
    /// All providers in priority order.
    pub const ALL: [ProviderId; 2] = [ProviderId::Gemini, ProviderId::OpenAi];

    fn slot(self) -> usize {
        match self {
            Self::Gemini => 0,
            Self::OpenAi => 1,
        }
    }
}

/// A fully composed prompt sent to a provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRequest {
    pub system: String,
    pub user: String,
    pub settings: GenerationSettings,
}

impl ProviderRequest {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            settings: GenerationSettings::default(),
        }
    }

    /// System and user prompt joined into a single turn.
    pub fn combined(&self) -> String {
        format!("{}\n\n{}", self.system, self.user)
    }
}

/// Core trait implemented by every provider adapter.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Which backend this adapter talks to. Every error it returns carries this tag.
    fn id(&self) -> ProviderId;

    /// The model ID this adapter requests.
    fn model_id(&self) -> &str;

    /// Return the raw text produced for `request`.
    async fn generate_text(&self, request: &ProviderRequest) -> Result<String, ProviderError>;
}

/// Fixed-size table of configured providers, indexed by [`ProviderId`].
///
/// An unconfigured provider is an empty slot and is never invoked.
#[derive(Clone, Default)]
pub struct ProviderSet {
    slots: [Option<Arc<dyn TextProvider>>; 2],
}

impl fmt::Debug for ProviderSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderSet")
            .field("configured", &self.ids())
            .finish()
    }
}

impl ProviderSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build adapters for every provider that has a credential.
    #[allow(unused_mut, unused_variables)]
    pub fn from_config(config: &ProvidersConfig) -> Self {
        let mut set = Self::empty();

        #[cfg(feature = "google")]
        if let Some(key) = config.gemini.credential() {
            set = set.with(Arc::new(google::GeminiProvider::new(
                key.to_string(),
                config.gemini.model.clone(),
                config.gemini.base_url.clone(),
            )));
        }

        #[cfg(feature = "openai")]
        if let Some(key) = config.openai.credential() {
            set = set.with(Arc::new(openai::OpenAiProvider::new(
                key.to_string(),
                config.openai.model.clone(),
                config.openai.base_url.clone(),
            )));
        }

        set
    }

    /// Install `provider` in its slot, replacing any previous adapter with the same id.
    pub fn with(mut self, provider: Arc<dyn TextProvider>) -> Self {
        let slot = provider.id().slot();
        self.slots[slot] = Some(provider);
        self
    }

    pub fn get(&self, id: ProviderId) -> Option<&Arc<dyn TextProvider>> {
        self.slots[id.slot()].as_ref()
    }

    /// Configured providers in priority order.
    pub fn configured(&self) -> impl Iterator<Item = &Arc<dyn TextProvider>> {
        ProviderId::ALL.into_iter().filter_map(|id| self.get(id))
    }

    /// The highest-priority configured provider.
    pub fn primary(&self) -> Option<&Arc<dyn TextProvider>> {
        self.configured().next()
    }

    /// The configured provider to try after `failed` has failed.
    pub fn fallback_for(&self, failed: ProviderId) -> Option<&Arc<dyn TextProvider>> {
        self.configured().find(|p| p.id() != failed)
    }

    pub fn ids(&self) -> Vec<ProviderId> {
        self.configured().map(|p| p.id()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.primary().is_none()
    }
}
