//! Position Advisor
//!
//! Ties price lookup, template selection, generation and post-processing
//! together. Stateless per request: the only shared pieces are the provider,
//! the exchange client and immutable configuration.

use std::sync::Arc;

use agent_core::{Agent, LlmProvider};
use chrono::Utc;
use rand::{Rng, SeedableRng, rngs::StdRng};
use rust_decimal::Decimal;

use crate::error::{AdvisorError, Result};
use crate::exchange::ExchangeClient;
use crate::leverage::LeveragePolicy;
use crate::model::{AdviceReport, PositionQuery, VibeSuggestion};
use crate::prompt::{self, PromptMode, VIBE_PREAMBLE};
use crate::risk;

/// Advisor configuration
#[derive(Clone, Debug)]
pub struct AdvisorConfig {
    /// System preamble (None = send the bare prompt)
    pub preamble: Option<String>,

    pub model: String,

    /// Trading pair quoted in prompts and greetings
    pub symbol: String,

    pub leverage_policy: LeveragePolicy,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            preamble: Some(VIBE_PREAMBLE.into()),
            model: agent_core::provider::DEFAULT_MODEL.into(),
            symbol: crate::exchange::DEFAULT_SYMBOL.into(),
            leverage_policy: LeveragePolicy::default(),
        }
    }
}

impl AdvisorConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let preamble = match std::env::var("VIBE_PREAMBLE") {
            Ok(p) if p.trim().is_empty() => None,
            Ok(p) => Some(p),
            Err(_) => defaults.preamble,
        };
        let model = std::env::var("LLM_MODEL").unwrap_or(defaults.model);
        let symbol = std::env::var("PRICE_SYMBOL")
            .map(|s| s.to_uppercase())
            .unwrap_or(defaults.symbol);
        let leverage_policy = match std::env::var("LEVERAGE_POLICY") {
            Ok(raw) => raw.parse().map_err(AdvisorError::Config)?,
            Err(_) => defaults.leverage_policy,
        };

        Ok(Self {
            preamble,
            model,
            symbol,
            leverage_policy,
        })
    }
}

/// The position advisory service
pub struct PositionAdvisor {
    agent: Agent,
    exchange: Arc<dyn ExchangeClient>,
    config: AdvisorConfig,
}

impl PositionAdvisor {
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        exchange: Arc<dyn ExchangeClient>,
        config: AdvisorConfig,
    ) -> Self {
        let mut builder = Agent::builder(provider).model(config.model.clone());
        if let Some(preamble) = &config.preamble {
            builder = builder.preamble(preamble.clone());
        }

        Self {
            agent: builder.build(),
            exchange,
            config,
        }
    }

    pub fn provider_name(&self) -> &str {
        self.agent.provider().name()
    }

    pub fn exchange_name(&self) -> &str {
        self.exchange.name()
    }

    /// Whether the text-generation backend answers its health probe
    pub async fn provider_healthy(&self) -> bool {
        self.agent.provider().health_check().await.unwrap_or(false)
    }

    /// Current price, or None if the lookup failed (never fatal)
    pub async fn current_price(&self) -> Option<Decimal> {
        match self.exchange.get_price(&self.config.symbol).await {
            Ok(price) => Some(price),
            Err(e) => {
                tracing::warn!(
                    exchange = self.exchange.name(),
                    symbol = %self.config.symbol,
                    "Price lookup failed, continuing without price: {}",
                    e
                );
                None
            }
        }
    }

    /// Landing-page greeting; mentions the price when we have one
    pub async fn greeting(&self) -> String {
        let price_line = match self.current_price().await {
            Some(price) => format!("DOGE is trading at ${} right now.", price.normalize()),
            None => "DOGE price is unavailable right now, vibes only.".to_string(),
        };

        format!(
            "gm! Welcome to the DOGE vibe trader. {price_line} \
             GET /position for a leverage call or POST /analyze to rate your position. \
             Not financial advice, just vibes."
        )
    }

    /// Free-form leverage suggestion
    pub async fn suggest_position(&self) -> Result<VibeSuggestion> {
        let mut rng = StdRng::from_entropy();
        self.suggest_position_with(&mut rng).await
    }

    /// [`Self::suggest_position`] with a caller-supplied RNG
    pub async fn suggest_position_with<R: Rng + Send + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<VibeSuggestion> {
        let doge_price = self.current_price().await;
        let template = PromptMode::Suggestion.pick(rng);
        let prompt = prompt::render_suggestion(template, doge_price);

        let position = self.generate(&prompt).await?;
        let leverage = self.config.leverage_policy.resolve(&position, rng);

        tracing::info!(leverage, price = ?doge_price, "Generated position suggestion");

        Ok(VibeSuggestion {
            leverage,
            position,
            doge_price,
        })
    }

    /// Classify a position and ask for commentary on it
    pub async fn analyze(&self, query: &PositionQuery) -> Result<AdviceReport> {
        let mut rng = StdRng::from_entropy();
        self.analyze_with(query, &mut rng).await
    }

    /// [`Self::analyze`] with a caller-supplied RNG
    pub async fn analyze_with<R: Rng + Send + ?Sized>(
        &self,
        query: &PositionQuery,
        rng: &mut R,
    ) -> Result<AdviceReport> {
        let analysis = risk::classify(query)?;
        let template = PromptMode::Analysis.pick(rng);
        let prompt = prompt::render_analysis(template, query, &analysis);

        let ai_advice = self.generate(&prompt).await?;

        tracing::info!(
            risk = %analysis.risk_level,
            side = %analysis.position_type,
            distance = %analysis.distance_to_liquidation_pct.round_dp(2),
            "Analyzed position"
        );

        Ok(AdviceReport {
            ai_advice,
            timestamp: Utc::now(),
            analysis,
        })
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        tracing::debug!(%prompt, "Rendered prompt");

        self.agent.prompt(prompt).await.map_err(|e| {
            tracing::error!(provider = self.provider_name(), "Generation failed: {}", e);
            AdvisorError::from(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exchange::MockExchangeClient;
    use crate::leverage::{DEFAULT_LEVERAGE, RANDOM_LEVERAGE_MAX, RANDOM_LEVERAGE_MIN};
    use crate::model::{PositionType, RiskLevel};
    use agent_runtime::ScriptedProvider;
    use rust_decimal_macros::dec;

    fn advisor(
        provider: Arc<ScriptedProvider>,
        exchange: MockExchangeClient,
        policy: LeveragePolicy,
    ) -> PositionAdvisor {
        PositionAdvisor::new(
            provider,
            Arc::new(exchange),
            AdvisorConfig {
                leverage_policy: policy,
                ..Default::default()
            },
        )
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(11)
    }

    #[tokio::test]
    async fn test_suggestion_extracts_leverage_and_quotes_price() {
        let provider = Arc::new(ScriptedProvider::reply("go long with 35x leverage"));
        let advisor = advisor(
            provider.clone(),
            MockExchangeClient::with_price(dec!(0.1234)),
            LeveragePolicy::Extract,
        );

        let suggestion = advisor.suggest_position_with(&mut rng()).await.unwrap();

        assert_eq!(suggestion.leverage, 35);
        assert_eq!(suggestion.position, "go long with 35x leverage");
        assert_eq!(suggestion.doge_price, Some(dec!(0.1234)));
        assert!(provider.prompts()[0].ends_with("DOGE is trading at $0.1234 right now."));
    }

    #[tokio::test]
    async fn test_suggestion_survives_price_failure() {
        let provider = Arc::new(ScriptedProvider::reply("short it, no leverage figure"));
        let advisor = advisor(
            provider.clone(),
            MockExchangeClient::unavailable(),
            LeveragePolicy::Extract,
        );

        let suggestion = advisor.suggest_position_with(&mut rng()).await.unwrap();

        assert_eq!(suggestion.doge_price, None);
        assert_eq!(suggestion.leverage, DEFAULT_LEVERAGE);
        assert!(!provider.prompts()[0].contains("trading at $"));
    }

    #[tokio::test]
    async fn test_random_policy() {
        let provider = Arc::new(ScriptedProvider::reply("go long with 35x leverage"));
        let advisor = advisor(
            provider,
            MockExchangeClient::with_price(dec!(0.2)),
            LeveragePolicy::Random,
        );

        let suggestion = advisor.suggest_position_with(&mut rng()).await.unwrap();
        assert!((RANDOM_LEVERAGE_MIN..=RANDOM_LEVERAGE_MAX).contains(&suggestion.leverage));
    }

    #[tokio::test]
    async fn test_generation_failure_surfaces() {
        let provider = Arc::new(ScriptedProvider::failing("quota exceeded"));
        let advisor = advisor(
            provider,
            MockExchangeClient::with_price(dec!(0.2)),
            LeveragePolicy::Extract,
        );

        match advisor.suggest_position_with(&mut rng()).await {
            Err(AdvisorError::Generation(msg)) => assert!(msg.contains("quota exceeded")),
            other => panic!("expected generation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_analyze_classifies_and_prompts() {
        let provider = Arc::new(ScriptedProvider::reply("Hold tight, fren."));
        let advisor = advisor(
            provider.clone(),
            MockExchangeClient::unavailable(),
            LeveragePolicy::Extract,
        );
        let query = PositionQuery {
            position_size: dec!(1000),
            entry_price: dec!(0.10),
            liquidation_price: dec!(0.08),
            current_price: dec!(0.095),
            pnl_size: dec!(-5),
        };

        let report = advisor.analyze_with(&query, &mut rng()).await.unwrap();

        assert_eq!(report.ai_advice, "Hold tight, fren.");
        assert_eq!(report.analysis.risk_level, RiskLevel::Medium);
        assert_eq!(report.analysis.position_type, PositionType::Long);

        let prompt = &provider.prompts()[0];
        assert!(prompt.contains("MEDIUM"));
        assert!(prompt.contains("15.79"));
    }

    #[tokio::test]
    async fn test_analyze_rejects_out_of_range_prices_before_generation() {
        let provider = Arc::new(ScriptedProvider::reply("unused"));
        let advisor = advisor(
            provider.clone(),
            MockExchangeClient::unavailable(),
            LeveragePolicy::Extract,
        );
        let query = PositionQuery {
            position_size: dec!(1),
            entry_price: dec!(1),
            liquidation_price: Decimal::from_i128_with_scale(10_i128.pow(27), 0),
            current_price: dec!(1),
            pnl_size: Decimal::ZERO,
        };

        let err = advisor.analyze_with(&query, &mut rng()).await.unwrap_err();

        assert!(err.is_validation());
        assert!(provider.prompts().is_empty());
    }

    #[test]
    fn test_default_config_targets_doge() {
        let config = AdvisorConfig::default();
        assert_eq!(config.symbol, crate::exchange::DEFAULT_SYMBOL);
        assert_eq!(config.model, agent_core::provider::DEFAULT_MODEL);
        assert_eq!(config.leverage_policy, LeveragePolicy::Extract);
    }

    #[tokio::test]
    async fn test_greeting_with_and_without_price() {
        let provider = Arc::new(ScriptedProvider::reply("unused"));
        let priced = advisor(
            provider.clone(),
            MockExchangeClient::with_price(dec!(0.15)),
            LeveragePolicy::Extract,
        );
        assert!(priced.greeting().await.contains("$0.15"));

        let unpriced = advisor(
            provider.clone(),
            MockExchangeClient::unavailable(),
            LeveragePolicy::Extract,
        );
        assert!(unpriced.greeting().await.contains("unavailable"));
        assert!(provider.prompts().is_empty());
    }
}
