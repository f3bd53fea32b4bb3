//! vibe-server
//!
//! Axum server exposing DOGE leverage vibes and position risk analysis.

mod app;
mod config;
mod handlers;
mod state;

use std::sync::Arc;

use agent_core::LlmProvider;
use agent_runtime::{OpenAiCompatProvider, OpenAiConfig, ScriptedProvider};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vibe_advisor::{
    AdvisorConfig, PositionAdvisor,
    exchange::{BinanceClient, ExchangeClient, ExchangeConfig, MockExchangeClient},
};

use crate::app::build_router;
use crate::config::{LlmBackend, PriceFeed, ServerConfig};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    let config = ServerConfig::from_env()?;
    let advisor_config = AdvisorConfig::from_env()?;

    // Initialize LLM provider
    let provider: Arc<dyn LlmProvider> = match &config.llm_backend {
        LlmBackend::OpenAi => {
            let llm_config = OpenAiConfig::from_env();
            if llm_config.api_key.is_none() {
                tracing::warn!("⚠ No LLM API key - /position and /analyze will fail");
                tracing::warn!("  Set GROQ_API_KEY (or LLM_API_KEY) in .env");
            }
            tracing::info!("LLM endpoint: {} ({})", llm_config.base_url, advisor_config.model);
            Arc::new(OpenAiCompatProvider::from_config(llm_config)?)
        }
        LlmBackend::Scripted(reply) => {
            tracing::warn!("⚠ Using scripted LLM replies (LLM_PROVIDER=scripted)");
            Arc::new(ScriptedProvider::reply(reply.clone()))
        }
    };

    // Initialize price feed
    let exchange: Arc<dyn ExchangeClient> = match &config.price_feed {
        PriceFeed::Binance => {
            let exchange_config = ExchangeConfig::from_env();
            tracing::info!("Price feed: {} ({})", exchange_config.base_url, advisor_config.symbol);
            Arc::new(BinanceClient::new(&exchange_config)?)
        }
        PriceFeed::Static(Some(price)) => {
            tracing::info!("Price feed: static ${}", price);
            Arc::new(MockExchangeClient::with_price(*price))
        }
        PriceFeed::Static(None) => {
            tracing::warn!("⚠ Price feed: static with no STATIC_PRICE - prices unavailable");
            Arc::new(MockExchangeClient::unavailable())
        }
    };

    tracing::info!("Leverage policy: {:?}", advisor_config.leverage_policy);

    let state = AppState::new(PositionAdvisor::new(provider, exchange, advisor_config));
    let app = build_router(state);

    // Start server
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🐕 vibe-server running on http://{}", addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /          - Greeting with current DOGE price");
    tracing::info!("  GET  /health    - Health check");
    tracing::info!("  GET  /position  - Leverage vibe suggestion");
    tracing::info!("  POST /analyze   - Position risk analysis");
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}
