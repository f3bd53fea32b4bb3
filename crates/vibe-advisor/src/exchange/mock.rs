//! Mock Exchange Client
//!
//! For tests and offline demos. Returns a fixed price or always fails.

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::ExchangeClient;
use crate::error::{AdvisorError, Result};

/// Mock exchange client with a static price
pub struct MockExchangeClient {
    price: Option<Decimal>,
}

impl MockExchangeClient {
    /// Always quote `price`
    pub const fn with_price(price: Decimal) -> Self {
        Self { price: Some(price) }
    }

    /// Every lookup fails, as if the exchange were unreachable
    pub const fn unavailable() -> Self {
        Self { price: None }
    }
}

#[async_trait]
impl ExchangeClient for MockExchangeClient {
    async fn get_price(&self, symbol: &str) -> Result<Decimal> {
        self.price
            .ok_or_else(|| AdvisorError::Exchange(format!("mock exchange is down ({symbol})")))
    }

    fn name(&self) -> &str {
        "MockExchange"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_mock_exchange() {
        let exchange = MockExchangeClient::with_price(dec!(0.1234));
        assert_eq!(exchange.get_price("DOGEUSDT").await.unwrap(), dec!(0.1234));
    }

    #[tokio::test]
    async fn test_unavailable_exchange() {
        let exchange = MockExchangeClient::unavailable();
        assert!(exchange.get_price("DOGEUSDT").await.is_err());
    }
}
