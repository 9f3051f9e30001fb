//! Variantly binary entry point.

use clap::Parser;
use variantly::api::{self, AppState};
use variantly::cli::{Cli, Commands, GenerateArgs, ServeArgs};
use variantly::config::AppConfig;
use variantly::generation::ContentGenerator;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    variantly::telemetry::init(cli.json_logs);

    let result = match cli.command {
        Commands::Serve(args) => handle_serve(args).await,
        Commands::Generate(args) => handle_generate(args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn handle_serve(args: ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load()?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let app = api::router(AppState::from_config(&config));
    let addr = config.server.bind_address();
    tracing::info!(%addr, "starting server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn handle_generate(args: GenerateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    let generator = ContentGenerator::from_config(&config.providers);

    let (a, b) = generator.generate_pair(&args.prompt, args.content_type).await;
    let output = if args.show_source {
        serde_json::json!({ "optionA": a, "optionB": b })
    } else {
        serde_json::json!({ "optionA": a.content, "optionB": b.content })
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
