//! CLI entry point for Variantly.

use clap::{Parser, Subcommand};

use crate::types::ContentType;

/// Variantly A/B content service
#[derive(Parser, Debug)]
#[command(name = "variantly", version, about = "A/B caption and hashtag generator")]
pub struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API
    Serve(ServeArgs),
    /// Generate an A/B pair once and print it
    Generate(GenerateArgs),
}

/// Arguments for `variantly serve`.
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Bind host (overrides HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Bind port (overrides PORT)
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Arguments for `variantly generate`.
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// What the content is about
    pub prompt: String,

    /// Content type (post or story)
    #[arg(short = 't', long = "type", default_value = "post")]
    pub content_type: ContentType,

    /// Include which provider produced each option
    #[arg(long)]
    pub show_source: bool,
}
