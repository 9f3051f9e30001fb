//! Tests for A/B generation, fallback routing, and mock degradation.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{generator, ScriptedProvider};
use pretty_assertions::assert_eq;
use variantly::error::ProviderFailure;
use variantly::generation::{mock_content, ContentGenerator, ContentSource};
use variantly::provider::{ProviderId, ProviderSet};
use variantly::types::{ContentType, GeneratedContent, Variant};

const REPLY: &str = r##"{"caption":"Glow all summer","hashtags":["skincare","#summer"]}"##;

fn expected_reply() -> GeneratedContent {
    GeneratedContent::new("Glow all summer", vec!["skincare".into(), "summer".into()])
}

#[tokio::test]
async fn no_providers_yields_mock_pair() {
    let generator = ContentGenerator::new(ProviderSet::empty());
    let (a, b) = generator
        .generate_content("summer skincare tips", ContentType::Post)
        .await;

    assert_eq!(
        a.caption,
        "✨ summer skincare tips - loving this vibe! Can't wait to share more 💫"
    );
    assert_eq!(a.hashtags, vec!["lifestyle", "mood", "vibes", "content", "share"]);
    assert_eq!(
        b.caption,
        "Professional insight on summer skincare tips. Here's what you need to know:"
    );
    assert_eq!(
        b.hashtags,
        vec!["tips", "professional", "insights", "knowledge", "expert"]
    );
}

#[tokio::test]
async fn primary_success_skips_fallback() {
    let gemini = Arc::new(ScriptedProvider::new(ProviderId::Gemini).reply(REPLY).reply(REPLY));
    let openai = Arc::new(ScriptedProvider::new(ProviderId::OpenAi));
    let generator = generator(&[gemini.clone(), openai.clone()]);

    let (a, b) = generator.generate_pair("summer", ContentType::Post).await;

    assert_eq!(a.content, expected_reply());
    assert_eq!(b.content, expected_reply());
    assert_eq!(a.source, ContentSource::Provider(ProviderId::Gemini));
    assert_eq!(b.source, ContentSource::Provider(ProviderId::Gemini));
    assert_eq!(gemini.calls(), 2);
    assert_eq!(openai.calls(), 0);
}

#[tokio::test]
async fn primary_failure_falls_back_once_per_variant() {
    let gemini = Arc::new(
        ScriptedProvider::new(ProviderId::Gemini)
            .fail(ProviderFailure::Api {
                status: 500,
                message: "boom".into(),
            })
            .fail(ProviderFailure::Authentication("bad key".into())),
    );
    let openai = Arc::new(ScriptedProvider::new(ProviderId::OpenAi).reply(REPLY).reply(REPLY));
    let generator = generator(&[gemini.clone(), openai.clone()]);

    let (a, b) = generator.generate_pair("summer", ContentType::Story).await;

    assert_eq!(a.source, ContentSource::Provider(ProviderId::OpenAi));
    assert_eq!(b.source, ContentSource::Provider(ProviderId::OpenAi));
    assert_eq!(a.content, expected_reply());
    assert_eq!(gemini.calls(), 2);
    assert_eq!(openai.calls(), 2);
}

#[tokio::test]
async fn both_failing_degrades_to_mock() {
    let gemini = Arc::new(ScriptedProvider::new(ProviderId::Gemini).fail(ProviderFailure::EmptyResponse));
    let openai = Arc::new(ScriptedProvider::new(ProviderId::OpenAi).fail(ProviderFailure::RateLimited {
        retry_after_ms: Some(1000),
    }));
    let generator = generator(&[gemini.clone(), openai.clone()]);

    let output = generator
        .generate_variant("coffee", ContentType::Post, Variant::B)
        .await;

    assert_eq!(output.source, ContentSource::Mock);
    assert_eq!(output.content, mock_content("coffee", Variant::B));
    assert_eq!(gemini.calls(), 1);
    assert_eq!(openai.calls(), 1);
}

#[tokio::test]
async fn one_variant_failing_leaves_the_other_intact() {
    let gemini = Arc::new(
        ScriptedProvider::new(ProviderId::Gemini)
            .reply(REPLY)
            .fail(ProviderFailure::EmptyResponse),
    );
    let generator = generator(&[gemini.clone()]);

    let (a, b) = generator.generate_pair("tea", ContentType::Post).await;

    let (served, degraded) = if a.source == ContentSource::Mock {
        (b, a)
    } else {
        (a, b)
    };
    assert_eq!(served.source, ContentSource::Provider(ProviderId::Gemini));
    assert_eq!(served.content, expected_reply());
    assert_eq!(degraded.source, ContentSource::Mock);
    assert_eq!(degraded.content, mock_content("tea", degraded.variant));
    assert_ne!(served.variant, degraded.variant);
    assert_eq!(gemini.calls(), 2);
}

#[tokio::test]
async fn failure_tagged_with_another_provider_skips_fallback() {
    let gemini = Arc::new(
        ScriptedProvider::new(ProviderId::Gemini)
            .blaming(ProviderId::OpenAi)
            .fail(ProviderFailure::EmptyResponse),
    );
    let openai = Arc::new(ScriptedProvider::new(ProviderId::OpenAi).reply(REPLY));
    let generator = generator(&[gemini.clone(), openai.clone()]);

    let output = generator
        .generate_variant("tea", ContentType::Post, Variant::A)
        .await;

    assert_eq!(output.source, ContentSource::Mock);
    assert_eq!(output.content, mock_content("tea", Variant::A));
    assert_eq!(gemini.calls(), 1);
    assert_eq!(openai.calls(), 0);
}

#[tokio::test]
async fn single_failing_provider_goes_straight_to_mock() {
    let openai = Arc::new(ScriptedProvider::new(ProviderId::OpenAi).fail(ProviderFailure::EmptyResponse));
    let generator = generator(&[openai.clone()]);

    let output = generator
        .generate_variant("coffee", ContentType::Post, Variant::A)
        .await;

    assert_eq!(output.source, ContentSource::Mock);
    assert_eq!(output.content, mock_content("coffee", Variant::A));
    assert_eq!(openai.calls(), 1);
}

#[tokio::test]
async fn openai_alone_is_primary() {
    let openai = Arc::new(ScriptedProvider::new(ProviderId::OpenAi).reply(REPLY));
    let generator = generator(&[openai.clone()]);

    let output = generator
        .generate_variant("coffee", ContentType::Post, Variant::A)
        .await;

    assert_eq!(output.source, ContentSource::Provider(ProviderId::OpenAi));
    assert_eq!(openai.calls(), 1);
}

#[tokio::test]
async fn unstructured_reply_is_normalized() {
    let gemini = Arc::new(
        ScriptedProvider::new(ProviderId::Gemini).reply("Check this out\n#fun #sun #summer"),
    );
    let generator = generator(&[gemini]);

    let output = generator
        .generate_variant("beach", ContentType::Post, Variant::A)
        .await;

    assert_eq!(
        output.content,
        GeneratedContent::new(
            "Check this out",
            vec!["fun".into(), "sun".into(), "summer".into()]
        )
    );
}

#[tokio::test]
async fn request_carries_variant_style_and_prompt() {
    let gemini = Arc::new(ScriptedProvider::new(ProviderId::Gemini).reply(REPLY));
    let generator = generator(&[gemini.clone()]);

    generator
        .generate_variant("latte art", ContentType::Story, Variant::B)
        .await;

    let requests = gemini.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].user, "Create content for: latte art");
    assert!(requests[0].system.contains("story content"));
    assert!(requests[0].system.contains("professional"));
    assert!(requests[0].system.contains("150"));
}

#[tokio::test(start_paused = true)]
async fn hanging_primary_times_out_and_falls_back() {
    let gemini = Arc::new(ScriptedProvider::hanging(ProviderId::Gemini));
    let openai = Arc::new(ScriptedProvider::new(ProviderId::OpenAi).reply(REPLY));
    let generator = generator(&[gemini.clone(), openai.clone()]).with_timeout(Duration::from_secs(5));

    let output = generator
        .generate_variant("slow", ContentType::Post, Variant::A)
        .await;

    assert_eq!(output.source, ContentSource::Provider(ProviderId::OpenAi));
    assert_eq!(output.content, expected_reply());
    assert_eq!(gemini.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn hanging_only_provider_degrades_to_mock() {
    let gemini = Arc::new(ScriptedProvider::hanging(ProviderId::Gemini));
    let generator = generator(&[gemini]).with_timeout(Duration::from_secs(1));

    let (a, b) = generator.generate_content("slow", ContentType::Post).await;

    assert_eq!(a, mock_content("slow", Variant::A));
    assert_eq!(b, mock_content("slow", Variant::B));
}

#[tokio::test]
async fn panicking_provider_degrades_to_mock() {
    let gemini = Arc::new(ScriptedProvider::panicking(ProviderId::Gemini));
    let generator = generator(&[gemini]);

    let (a, b) = generator.generate_pair("risky", ContentType::Post).await;

    assert_eq!(a.source, ContentSource::Mock);
    assert_eq!(b.source, ContentSource::Mock);
    assert_eq!(a.content, mock_content("risky", Variant::A));
    assert_eq!(b.content, mock_content("risky", Variant::B));
}
