//! Content types, variants, and the generated caption/hashtag pair.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Kind of post the content is written for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumString)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum ContentType {
    Post,
    Story,
}

impl ContentType {
    /// Maximum caption length requested from providers.
    pub fn caption_limit(self) -> usize {
        match self {
            Self::Post => 200,
            Self::Story => 150,
        }
    }

    /// Lower-case label used inside prompts.
    pub fn label(self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::Story => "story",
        }
    }
}

/// One of the two parallel generation attempts of an A/B test.
///
/// Also the value recorded when a user picks an option.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Variant {
    A,
    B,
}

/// A caption plus its hashtags (without the leading `#`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedContent {
    pub caption: String,
    pub hashtags: Vec<String>,
}

impl GeneratedContent {
    pub fn new(caption: impl Into<String>, hashtags: Vec<String>) -> Self {
        Self {
            caption: caption.into(),
            hashtags,
        }
    }
}
