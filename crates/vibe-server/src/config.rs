//! Server Configuration
//!
//! Everything comes from the environment (after `.env` is loaded).

use std::str::FromStr;

use anyhow::{Context, bail};
use rust_decimal::Decimal;

/// Where prices come from
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PriceFeed {
    /// Live Binance ticker
    Binance,
    /// Fixed price; `None` simulates an exchange outage
    Static(Option<Decimal>),
}

/// Which text-generation backend to talk to
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LlmBackend {
    /// OpenAI-compatible HTTP endpoint (Groq by default)
    OpenAi,
    /// Offline canned reply
    Scripted(String),
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub price_feed: PriceFeed,
    pub llm_backend: LlmBackend,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 3000,
            price_feed: PriceFeed::Binance,
            llm_backend: LlmBackend::OpenAi,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the environment in production)
    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();

        let host = get("BIND_HOST").unwrap_or(defaults.host);
        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a port number, got '{raw}'"))?,
            None => defaults.port,
        };

        let price_feed = match get("PRICE_FEED").as_deref().map(str::trim) {
            None | Some("binance") => PriceFeed::Binance,
            Some("static") => {
                let price = get("STATIC_PRICE")
                    .map(|raw| {
                        Decimal::from_str(raw.trim())
                            .with_context(|| format!("STATIC_PRICE must be a decimal, got '{raw}'"))
                    })
                    .transpose()?;
                PriceFeed::Static(price)
            }
            Some(other) => bail!("unknown PRICE_FEED '{other}' (expected binance|static)"),
        };

        let llm_backend = match get("LLM_PROVIDER").as_deref().map(str::trim) {
            None | Some("openai" | "groq") => LlmBackend::OpenAi,
            Some("scripted") => LlmBackend::Scripted(get("SCRIPTED_REPLY").unwrap_or_else(|| {
                "Long DOGE with 25x leverage, the doge never sleeps. Not financial advice.".into()
            })),
            Some(other) => bail!("unknown LLM_PROVIDER '{other}' (expected openai|scripted)"),
        };

        Ok(Self {
            host,
            port,
            price_feed,
            llm_backend,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
