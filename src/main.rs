mod config;
mod error;
mod handlers;
mod models;
mod server;
mod services;

use anyhow::{Context, Result};
use dotenv::dotenv;
use std::net::SocketAddr;
use std::sync::Arc;

use config::Config;
use server::create_router;
use services::{AIService, ChatCompletion, Geocoder, OpenAIClient, OpenCageClient};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before the logger so RUST_LOG from the file applies
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("🚀 Starting travel lens relay...");

    let config = Config::from_env()?;

    if config.geocoding.is_enabled() {
        log::info!("✅ Reverse geocoding enabled ({})", config.geocoding.base_url);
    } else {
        log::warn!("⚠️ OPENCAGE_API_KEY not set, locations will be reported as unknown");
    }
    let geocoder: Arc<dyn Geocoder> = Arc::new(OpenCageClient::new(config.geocoding.clone()));

    let chat: Arc<dyn ChatCompletion> = Arc::new(OpenAIClient::new(config.openai_base_url.clone()));
    log::info!("✅ Chat completion client targeting {}", config.openai_base_url);

    let ai_service = Arc::new(AIService::new(geocoder, chat));
    let app = create_router(ai_service, config.body_limit);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    log::info!("🌐 Server is running on port {} ({})", config.port, config.environment);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    log::info!("🛑 Shutting down...");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for Ctrl+C: {}", e);
    }
}
