//! Sales trainer - role-play practice against a simulated bank customer
//!
//! A Rust backend driving one state machine per conversation, with the
//! customer's lines produced by a language model.

mod api;
mod config;
mod llm;
mod persona;
mod prompt;
mod runtime;
mod selection;
mod state_machine;

use api::{create_router, AppState};
use config::AppConfig;
use llm::{LlmService, LoggingService, OpenAiChatService};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const REAP_PERIOD: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sales_trainer=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let config = AppConfig::from_env()?;

    if config.llm.api_key.is_none() {
        tracing::warn!("LLM_API_KEY is not set; every customer reply will fail until it is configured");
    }

    // Initialize completion service
    let service: Arc<dyn LlmService> = Arc::new(OpenAiChatService::new(&config.llm)?);
    let llm: Arc<dyn LlmService> = Arc::new(LoggingService::new(service));
    tracing::info!(
        model = %llm.model_id(),
        base_url = %config.llm.base_url,
        conclusion_delay_ms = %config.conclusion_delay.as_millis(),
        idle_timeout_secs = %config.idle_timeout.as_secs(),
        "Completion service initialized"
    );

    // Create application state
    let state = AppState::new(llm, config.conclusion_delay, config.idle_timeout);
    state.manager.spawn_reaper(REAP_PERIOD);

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Sales trainer server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
