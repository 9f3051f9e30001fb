//! Generation workflows on top of the generator and the store.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::error::{Result, VariantlyError};
use crate::generation::ContentGenerator;
use crate::store::GenerationStore;
use crate::types::{
    Analytics, GenerateContentRequest, GenerateContentResponse, HistoryQuery, HistoryResponse,
    NewGeneration, SelectOptionRequest, SelectOptionResponse,
};

pub const DEFAULT_HISTORY_LIMIT: usize = 20;
pub const MAX_HISTORY_LIMIT: usize = 100;

#[derive(Clone)]
pub struct GenerationService {
    generator: ContentGenerator,
    store: Arc<dyn GenerationStore>,
}

impl GenerationService {
    pub fn new(generator: ContentGenerator, store: Arc<dyn GenerationStore>) -> Self {
        Self { generator, store }
    }

    /// Generate both options and persist them as a new, unselected generation.
    pub async fn generate(
        &self,
        request: GenerateContentRequest,
        user: Option<Uuid>,
    ) -> Result<GenerateContentResponse> {
        request.validate()?;

        let (option_a, option_b) = self
            .generator
            .generate_content(&request.prompt, request.content_type)
            .await;

        let generation = self
            .store
            .create(NewGeneration {
                prompt: request.prompt,
                content_type: request.content_type,
                option_a,
                option_b,
                user_id: user,
            })
            .await?;
        info!(generation_id = %generation.id, content_type = %generation.content_type, "stored generation");

        Ok(GenerateContentResponse {
            id: generation.id,
            prompt: generation.prompt,
            content_type: generation.content_type,
            option_a: generation.option_a,
            option_b: generation.option_b,
        })
    }

    pub async fn select(
        &self,
        request: SelectOptionRequest,
        user: Option<Uuid>,
    ) -> Result<SelectOptionResponse> {
        if self.store.find(request.generation_id, user).await?.is_none() {
            return Err(VariantlyError::NotFound("Generation not found".into()));
        }

        let generation = self
            .store
            .record_selection(request.generation_id, request.selected_option)
            .await?;
        info!(generation_id = %generation.id, selected = %request.selected_option, "recorded selection");

        Ok(SelectOptionResponse {
            success: true,
            generation,
        })
    }

    pub async fn history(&self, user: Option<Uuid>, query: HistoryQuery) -> Result<HistoryResponse> {
        let limit = query
            .limit
            .unwrap_or(DEFAULT_HISTORY_LIMIT)
            .clamp(1, MAX_HISTORY_LIMIT);
        let offset = query.offset.unwrap_or(0);

        let (generations, total) = self.store.history(user, limit, offset).await?;
        Ok(HistoryResponse { generations, total })
    }

    pub async fn analytics(&self, user: Uuid) -> Result<Analytics> {
        self.store.analytics(Some(user)).await
    }
}
