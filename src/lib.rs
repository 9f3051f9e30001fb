//! Variantly: A/B caption and hashtag generation.
//!
//! Two tone variants of an Instagram caption are generated concurrently from
//! Gemini or OpenAI, normalized into the same `{caption, hashtags}` shape, and
//! degraded to deterministic mock content when no provider answers.
//!
//! # Quick Start
//!
//! ```no_run
//! use variantly::config::AppConfig;
//! use variantly::generation::ContentGenerator;
//! use variantly::types::ContentType;
//!
//! # async fn example() -> variantly::error::Result<()> {
//! let config = AppConfig::load()?;
//! let generator = ContentGenerator::from_config(&config.providers);
//! let (a, b) = generator
//!     .generate_content("summer skincare tips", ContentType::Post)
//!     .await;
//! println!("A: {}\nB: {}", a.caption, b.caption);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod generation;
pub mod provider;
pub mod service;
pub mod store;
pub mod telemetry;
pub mod types;
pub mod util;

#[cfg(feature = "cli")]
pub mod cli;
