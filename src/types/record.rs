//! Persisted records and analytics views.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::content::{ContentType, GeneratedContent, Variant};

/// A stored A/B generation and its optional selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Generation {
    pub id: Uuid,
    pub prompt: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub option_a: GeneratedContent,
    pub option_b: GeneratedContent,
    pub selected_option: Option<Variant>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a [`Generation`].
#[derive(Debug, Clone)]
pub struct NewGeneration {
    pub prompt: String,
    pub content_type: ContentType,
    pub option_a: GeneratedContent,
    pub option_b: GeneratedContent,
    pub user_id: Option<Uuid>,
}

/// A registered account.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public view of a [`User`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptCount {
    pub prompt: String,
    pub count: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct ContentTypeBreakdown {
    pub post: u64,
    pub story: u64,
}

impl ContentTypeBreakdown {
    pub fn record(&mut self, content_type: ContentType) {
        match content_type {
            ContentType::Post => self.post += 1,
            ContentType::Story => self.story += 1,
        }
    }
}

/// Selection statistics over a set of generations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub total_generations: u64,
    #[serde(rename = "optionASelected")]
    pub option_a_selected: u64,
    #[serde(rename = "optionBSelected")]
    pub option_b_selected: u64,
    pub most_popular_prompts: Vec<PromptCount>,
    pub content_type_breakdown: ContentTypeBreakdown,
}
