mod config;
mod errors;
mod intake;
mod llm_client;
mod models;
mod questions;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::intake::store::SessionStore;
use crate::llm_client::LlmClient;
use crate::questions::generator::{FallbackOnlyGenerator, LlmQuestionGenerator, QuestionGenerator};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting TalentScout intake v{}", env!("CARGO_PKG_VERSION"));

    let generator = build_generator(&config)?;

    let state = AppState {
        sessions: SessionStore::default(),
        generator,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Claude-backed generator when an API key is configured, fallback-only otherwise.
fn build_generator(config: &Config) -> Result<Arc<dyn QuestionGenerator>> {
    match &config.anthropic_api_key {
        Some(key) => {
            let llm = LlmClient::new(key.clone(), config.generation_timeout)?;
            info!(
                "Question generator: LLM (model: {}, timeout: {}s)",
                llm_client::MODEL,
                config.generation_timeout.as_secs()
            );
            Ok(Arc::new(LlmQuestionGenerator(llm)))
        }
        None => {
            warn!("ANTHROPIC_API_KEY not set; every technology will get fallback questions");
            Ok(Arc::new(FallbackOnlyGenerator))
        }
    }
}
