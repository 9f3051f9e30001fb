//! Turn arbitrary provider text into a [`GeneratedContent`].
//!
//! Two pure stages, first success wins:
//! 1. the JSON object spanning the first `{` to the last `}` of the text
//! 2. line heuristics for providers that ignored the format instructions
//!
//! Normalization never fails; the worst case is a generic caption with no hashtags.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::types::GeneratedContent;

/// Hashtags kept per caption.
pub const MAX_HASHTAGS: usize = 7;

/// Caption used when no line of the response qualifies.
pub const GENERIC_CAPTION: &str = "Generated content";

const MIN_CAPTION_CHARS: usize = 10;

fn hashtag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"#(\w+)").expect("valid hashtag pattern"))
}

/// Normalize a raw provider response.
pub fn parse(raw: &str) -> GeneratedContent {
    parse_structured(raw).unwrap_or_else(|| parse_heuristic(raw))
}

/// Stage 1: the embedded JSON object, if it carries both fields.
pub fn parse_structured(raw: &str) -> Option<GeneratedContent> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }

    let value: Value = serde_json::from_str(&raw[start..=end]).ok()?;
    let caption = value.get("caption")?.as_str()?.trim();
    if caption.is_empty() {
        return None;
    }

    let hashtags = match value.get("hashtags")? {
        Value::Null => return None,
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .filter_map(clean_hashtag)
            .take(MAX_HASHTAGS)
            .collect(),
        _ => Vec::new(),
    };

    Some(GeneratedContent::new(caption, hashtags))
}

/// Stage 2: first long non-hashtag line as caption, `#word` tokens as hashtags.
pub fn parse_heuristic(raw: &str) -> GeneratedContent {
    let lines: Vec<&str> = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let caption = lines
        .iter()
        .find(|line| !line.starts_with('#') && line.chars().count() > MIN_CAPTION_CHARS)
        .map_or_else(|| GENERIC_CAPTION.to_string(), |line| (*line).to_string());

    let hashtags = lines
        .iter()
        .filter(|line| line.contains('#'))
        .flat_map(|line| hashtag_pattern().captures_iter(*line))
        .map(|caps| caps[1].to_string())
        .take(MAX_HASHTAGS)
        .collect();

    GeneratedContent::new(caption, hashtags)
}

/// Strip the marker and any whitespace; drop tags that end up empty.
fn clean_hashtag(tag: &str) -> Option<String> {
    let cleaned: String = tag
        .trim()
        .trim_start_matches('#')
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    (!cleaned.is_empty()).then_some(cleaned)
}
