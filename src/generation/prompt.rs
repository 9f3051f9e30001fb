//! Prompt construction per content type and variant.

use crate::provider::ProviderRequest;
use crate::types::{ContentType, Variant};

fn variant_style(variant: Variant) -> &'static str {
    match variant {
        Variant::A => {
            "Create engaging, casual content with emojis and trending language. \
             Focus on relatability and personal connection."
        }
        Variant::B => {
            "Create professional, informative content with clear value proposition. \
             Focus on expertise and actionable insights."
        }
    }
}

/// System instruction for one variant.
pub fn system_prompt(content_type: ContentType, variant: Variant) -> String {
    let label = content_type.label();
    format!(
        "You are an Instagram content creator specializing in {label} content. {style}

Please respond with a JSON object containing:
- caption: A compelling {label} caption (max {limit} characters)
- hashtags: An array of 3-7 relevant hashtags (without # symbol)

Example format:
{{
  \"caption\": \"Your caption here\",
  \"hashtags\": [\"hashtag1\", \"hashtag2\", \"hashtag3\"]
}}",
        style = variant_style(variant),
        limit = content_type.caption_limit(),
    )
}

pub fn user_prompt(prompt: &str) -> String {
    format!("Create content for: {prompt}")
}

/// The full provider request for one variant attempt.
pub fn build_request(prompt: &str, content_type: ContentType, variant: Variant) -> ProviderRequest {
    ProviderRequest::new(system_prompt(content_type, variant), user_prompt(prompt))
}
