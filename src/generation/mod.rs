//! Content generation: prompts, provider orchestration, and normalization.

pub mod generator;
pub mod mock;
pub mod normalize;
pub mod prompt;

pub use generator::{ContentGenerator, ContentSource, VariantOutput};
pub use mock::mock_content;
pub use normalize::parse;
