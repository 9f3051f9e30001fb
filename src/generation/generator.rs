//! A/B content generation with provider fallback.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, error, info, warn};

use crate::config::ProvidersConfig;
use crate::error::ProviderError;
use crate::provider::{ProviderId, ProviderRequest, ProviderSet, TextProvider};
use crate::types::{ContentType, GeneratedContent, Variant};
use crate::util::timeout::with_timeout;

use super::{mock, normalize, prompt};

/// Where a variant's content came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "provider", rename_all = "snake_case")]
pub enum ContentSource {
    Provider(ProviderId),
    Mock,
}

/// Result of a single variant attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariantOutput {
    pub variant: Variant,
    pub content: GeneratedContent,
    pub source: ContentSource,
}

impl VariantOutput {
    fn mock(prompt: &str, variant: Variant) -> Self {
        Self {
            variant,
            content: mock::mock_content(prompt, variant),
            source: ContentSource::Mock,
        }
    }
}

/// Produces A/B content pairs from the configured providers.
///
/// Generation is infallible from the caller's side: provider failures fall
/// back to the other provider once, then to [`mock::mock_content`].
#[derive(Debug, Clone)]
pub struct ContentGenerator {
    providers: Arc<ProviderSet>,
    timeout: Duration,
}

impl ContentGenerator {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(providers: ProviderSet) -> Self {
        Self {
            providers: Arc::new(providers),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    pub fn from_config(config: &ProvidersConfig) -> Self {
        Self::new(ProviderSet::from_config(config)).with_timeout(config.timeout())
    }

    /// Bound every provider call by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn providers(&self) -> &ProviderSet {
        &self.providers
    }

    /// Generate options A and B for `prompt`.
    pub async fn generate_content(
        &self,
        prompt: &str,
        content_type: ContentType,
    ) -> (GeneratedContent, GeneratedContent) {
        let (a, b) = self.generate_pair(prompt, content_type).await;
        (a.content, b.content)
    }

    /// Like [`generate_content`](Self::generate_content), keeping the source of each option.
    ///
    /// Both variants run as separate tasks; a panic in one degrades that
    /// variant to mock content and leaves the other untouched.
    pub async fn generate_pair(
        &self,
        prompt: &str,
        content_type: ContentType,
    ) -> (VariantOutput, VariantOutput) {
        let task_a = self.spawn_variant(prompt, content_type, Variant::A);
        let task_b = self.spawn_variant(prompt, content_type, Variant::B);

        let (a, b) = futures::future::join(task_a, task_b).await;
        (
            settle(a, prompt, Variant::A),
            settle(b, prompt, Variant::B),
        )
    }

    fn spawn_variant(
        &self,
        prompt: &str,
        content_type: ContentType,
        variant: Variant,
    ) -> JoinHandle<VariantOutput> {
        let generator = self.clone();
        let prompt = prompt.to_string();
        tokio::spawn(async move {
            generator
                .generate_variant(&prompt, content_type, variant)
                .await
        })
    }

    /// Run one variant: primary provider, at most one fallback, then mock content.
    pub async fn generate_variant(
        &self,
        prompt: &str,
        content_type: ContentType,
        variant: Variant,
    ) -> VariantOutput {
        let request = prompt::build_request(prompt, content_type, variant);

        let Some(primary) = self.providers.primary() else {
            info!(%variant, "no provider configured, using mock content");
            return VariantOutput::mock(prompt, variant);
        };

        let err = match self.call(primary, &request).await {
            Ok(raw) => return from_provider(primary.id(), variant, &raw),
            Err(err) => err,
        };
        warn!(
            %variant,
            provider = %err.provider,
            category = %err.category(),
            transient = err.category().is_transient(),
            error = %err,
            "provider call failed"
        );

        // Only a failure attributed to the primary moves on to the other provider.
        if err.provider == primary.id() {
            if let Some(fallback) = self.providers.fallback_for(primary.id()) {
                debug!(%variant, provider = %fallback.id(), "trying fallback provider");
                match self.call(fallback, &request).await {
                    Ok(raw) => return from_provider(fallback.id(), variant, &raw),
                    Err(err) => warn!(
                        %variant,
                        provider = %err.provider,
                        category = %err.category(),
                        transient = err.category().is_transient(),
                        error = %err,
                        "fallback provider also failed"
                    ),
                }
            }
        }

        info!(%variant, "all providers unavailable, using mock content");
        VariantOutput::mock(prompt, variant)
    }

    async fn call(
        &self,
        provider: &Arc<dyn TextProvider>,
        request: &ProviderRequest,
    ) -> Result<String, ProviderError> {
        with_timeout(provider.id(), self.timeout, provider.generate_text(request)).await
    }
}

fn from_provider(provider: ProviderId, variant: Variant, raw: &str) -> VariantOutput {
    VariantOutput {
        variant,
        content: normalize::parse(raw),
        source: ContentSource::Provider(provider),
    }
}

fn settle(
    result: Result<VariantOutput, JoinError>,
    prompt: &str,
    variant: Variant,
) -> VariantOutput {
    match result {
        Ok(output) => output,
        Err(join_err) => {
            error!(%variant, error = %join_err, "variant task did not complete");
            VariantOutput::mock(prompt, variant)
        }
    }
}
