//! Binance Ticker Client
//!
//! `GET /api/v3/ticker/price?symbol=...` returns `{"symbol": "...", "price": "0.12340000"}`.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::ExchangeClient;
use crate::error::{AdvisorError, Result};

pub const BINANCE_BASE_URL: &str = "https://api.binance.com";
pub const DEFAULT_SYMBOL: &str = "DOGEUSDT";

/// Price feed configuration
#[derive(Clone, Debug)]
pub struct ExchangeConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            base_url: BINANCE_BASE_URL.into(),
            timeout_secs: 10,
        }
    }
}

impl ExchangeConfig {
    pub fn from_env() -> Self {
        let base_url = std::env::var("PRICE_API_URL").unwrap_or_else(|_| BINANCE_BASE_URL.into());
        let timeout_secs = std::env::var("PRICE_TIMEOUT_SECS")
            .ok()
            .and_then(|t| t.parse().ok())
            .unwrap_or(10);

        Self {
            base_url,
            timeout_secs,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TickerPrice {
    price: String,
}

/// Live ticker client
pub struct BinanceClient {
    client: reqwest::Client,
    base_url: String,
}

impl BinanceClient {
    pub fn new(config: &ExchangeConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn ticker_url(&self) -> String {
        format!("{}/api/v3/ticker/price", self.base_url)
    }
}

/// Parse the ticker body into a positive price
fn parse_ticker(symbol: &str, body: &str) -> Result<Decimal> {
    let ticker: TickerPrice = serde_json::from_str(body)?;
    Decimal::from_str(ticker.price.trim())
        .ok()
        .filter(|p| p.is_sign_positive() && !p.is_zero())
        .map(|p| p.normalize())
        .ok_or_else(|| AdvisorError::PriceUnavailable(symbol.to_string()))
}

#[async_trait]
impl ExchangeClient for BinanceClient {
    async fn get_price(&self, symbol: &str) -> Result<Decimal> {
        let response = self
            .client
            .get(self.ticker_url())
            .query(&[("symbol", symbol)])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(AdvisorError::Exchange(format!(
                "ticker for {symbol} returned HTTP {status}"
            )));
        }

        let price = parse_ticker(symbol, &body)?;
        tracing::debug!(symbol, %price, "Fetched ticker price");
        Ok(price)
    }

    fn name(&self) -> &str {
        "Binance"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_ticker() {
        let price = parse_ticker("DOGEUSDT", r#"{"symbol":"DOGEUSDT","price":"0.12340000"}"#).unwrap();
        assert_eq!(price, dec!(0.1234));
        assert_eq!(price.to_string(), "0.1234");
    }

    #[test]
    fn test_parse_ticker_rejects_garbage() {
        assert!(matches!(
            parse_ticker("DOGEUSDT", r#"{"price":"n/a"}"#),
            Err(AdvisorError::PriceUnavailable(_))
        ));
        assert!(matches!(
            parse_ticker("DOGEUSDT", r#"{"price":"0.0"}"#),
            Err(AdvisorError::PriceUnavailable(_))
        ));
        assert!(matches!(
            parse_ticker("DOGEUSDT", r#"{"code":-1121,"msg":"Invalid symbol."}"#),
            Err(AdvisorError::Serialization(_))
        ));
    }

    #[test]
    fn test_ticker_url() {
        let config = ExchangeConfig {
            base_url: "https://api.binance.com/".into(),
            ..Default::default()
        };
        let client = BinanceClient::new(&config).unwrap();
        assert_eq!(client.ticker_url(), "https://api.binance.com/api/v3/ticker/price");
    }

    #[tokio::test]
    async fn test_unreachable_exchange_is_an_error() {
        let config = ExchangeConfig {
            base_url: "http://127.0.0.1:9".into(),
            timeout_secs: 2,
            ..Default::default()
        };
        let client = BinanceClient::new(&config).unwrap();
        assert!(client.get_price(DEFAULT_SYMBOL).await.is_err());
    }
}
