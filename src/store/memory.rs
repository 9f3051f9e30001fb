//! In-process store backed by `tokio::sync::RwLock`.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{Result, VariantlyError};
use crate::types::{
    Analytics, ContentTypeBreakdown, Generation, NewGeneration, PromptCount, User, Variant,
};

use super::{GenerationStore, UserStore, POPULAR_PROMPT_LIMIT};

#[derive(Debug, Default)]
pub struct MemoryStore {
    generations: RwLock<Vec<Generation>>,
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn owned_by(generation: &Generation, owner: Option<Uuid>) -> bool {
    owner.map_or(true, |id| generation.user_id == Some(id))
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[async_trait]
impl GenerationStore for MemoryStore {
    async fn create(&self, new: NewGeneration) -> Result<Generation> {
        let now = Utc::now();
        let generation = Generation {
            id: Uuid::new_v4(),
            prompt: new.prompt,
            content_type: new.content_type,
            option_a: new.option_a,
            option_b: new.option_b,
            selected_option: None,
            user_id: new.user_id,
            created_at: now,
            updated_at: now,
        };
        self.generations.write().await.push(generation.clone());
        Ok(generation)
    }

    async fn find(&self, id: Uuid, owner: Option<Uuid>) -> Result<Option<Generation>> {
        Ok(self
            .generations
            .read()
            .await
            .iter()
            .find(|g| g.id == id && owned_by(g, owner))
            .cloned())
    }

    async fn record_selection(&self, id: Uuid, selected: Variant) -> Result<Generation> {
        let mut generations = self.generations.write().await;
        let generation = generations
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| VariantlyError::NotFound("Generation not found".into()))?;

        if let Some(existing) = generation.selected_option {
            return Err(VariantlyError::Conflict(format!(
                "Option {existing} was already selected for this generation"
            )));
        }

        generation.selected_option = Some(selected);
        generation.updated_at = Utc::now();
        Ok(generation.clone())
    }

    async fn history(
        &self,
        owner: Option<Uuid>,
        limit: usize,
        offset: usize,
    ) -> Result<(Vec<Generation>, u64)> {
        let generations = self.generations.read().await;
        let mut matching: Vec<&Generation> =
            generations.iter().filter(|g| owned_by(g, owner)).collect();
        // Insertion order breaks ties between equal timestamps.
        matching.reverse();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = matching.len() as u64;
        let page = matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();
        Ok((page, total))
    }

    async fn analytics(&self, owner: Option<Uuid>) -> Result<Analytics> {
        let generations = self.generations.read().await;
        let mut analytics = Analytics::default();
        let mut breakdown = ContentTypeBreakdown::default();
        let mut prompt_counts: HashMap<&str, u64> = HashMap::new();

        for generation in generations.iter().filter(|g| owned_by(g, owner)) {
            analytics.total_generations += 1;
            match generation.selected_option {
                Some(Variant::A) => analytics.option_a_selected += 1,
                Some(Variant::B) => analytics.option_b_selected += 1,
                None => {}
            }
            breakdown.record(generation.content_type);
            *prompt_counts.entry(generation.prompt.as_str()).or_default() += 1;
        }

        let mut popular: Vec<PromptCount> = prompt_counts
            .into_iter()
            .map(|(prompt, count)| PromptCount {
                prompt: prompt.to_string(),
                count,
            })
            .collect();
        popular.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.prompt.cmp(&b.prompt)));
        popular.truncate(POPULAR_PROMPT_LIMIT);

        analytics.most_popular_prompts = popular;
        analytics.content_type_breakdown = breakdown;
        Ok(analytics)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, email: &str, password_hash: String) -> Result<User> {
        let email = normalize_email(email);
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == email) {
            return Err(VariantlyError::Conflict(
                "User with this email already exists".into(),
            ));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email,
            password_hash,
            created_at: now,
            updated_at: now,
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let email = normalize_email(email);
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }
}
