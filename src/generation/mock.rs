//! Deterministic content used when no provider can answer.

use crate::types::{GeneratedContent, Variant};

const MOCK_A_HASHTAGS: [&str; 5] = ["lifestyle", "mood", "vibes", "content", "share"];
const MOCK_B_HASHTAGS: [&str; 5] = ["tips", "professional", "insights", "knowledge", "expert"];

/// Fixed fallback content for `variant`, with `prompt` embedded verbatim.
pub fn mock_content(prompt: &str, variant: Variant) -> GeneratedContent {
    match variant {
        Variant::A => GeneratedContent::new(
            format!("✨ {prompt} - loving this vibe! Can't wait to share more 💫"),
            to_owned(&MOCK_A_HASHTAGS),
        ),
        Variant::B => GeneratedContent::new(
            format!("Professional insight on {prompt}. Here's what you need to know:"),
            to_owned(&MOCK_B_HASHTAGS),
        ),
    }
}

fn to_owned(tags: &[&str]) -> Vec<String> {
    tags.iter().map(|t| (*t).to_string()).collect()
}
