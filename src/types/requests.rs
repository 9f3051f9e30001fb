//! Request and response bodies of the HTTP API.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::content::{ContentType, GeneratedContent, Variant};
use super::record::{Generation, UserProfile};

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct GenerateContentRequest {
    #[validate(
        length(min = 1, max = 200, message = "Prompt must be less than 200 characters"),
        custom(function = "not_blank")
    )]
    pub prompt: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    pub id: Uuid,
    pub prompt: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub option_a: GeneratedContent,
    pub option_b: GeneratedContent,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectOptionRequest {
    pub generation_id: Uuid,
    pub selected_option: Variant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOptionResponse {
    pub success: bool,
    pub generation: Generation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub generations: Vec<Generation>,
    pub total: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct CredentialsRequest {
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(
        min = 6,
        max = 100,
        message = "Password must be between 6 and 100 characters"
    ))]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub user: UserProfile,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Prompt is required".into());
        return Err(err);
    }
    Ok(())
}
