//! Persistence of generations and users.

pub mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::types::{Analytics, Generation, NewGeneration, User, Variant};

/// Number of prompts reported in [`Analytics::most_popular_prompts`].
pub const POPULAR_PROMPT_LIMIT: usize = 10;

/// Storage for A/B generations.
#[async_trait]
pub trait GenerationStore: Send + Sync {
    async fn create(&self, generation: NewGeneration) -> Result<Generation>;

    /// Look up a generation; with `owner`, only that user's records match.
    async fn find(&self, id: Uuid, owner: Option<Uuid>) -> Result<Option<Generation>>;

    /// Record the chosen option. A generation can be selected only once.
    async fn record_selection(&self, id: Uuid, selected: Variant) -> Result<Generation>;

    /// Newest first. Without `owner`, every generation is listed.
    async fn history(
        &self,
        owner: Option<Uuid>,
        limit: usize,
        offset: usize,
    ) -> Result<(Vec<Generation>, u64)>;

    async fn analytics(&self, owner: Option<Uuid>) -> Result<Analytics>;
}

/// Storage for user accounts.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with `Conflict` when the email is taken (case-insensitive).
    async fn create_user(&self, email: &str, password_hash: String) -> Result<User>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;
}
