//! Exchange Integration
//!
//! Price lookup against a market-data ticker endpoint.

mod binance;
mod mock;

pub use binance::{BINANCE_BASE_URL, BinanceClient, DEFAULT_SYMBOL, ExchangeConfig};
pub use mock::MockExchangeClient;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::error::Result;

/// Exchange client trait (Strategy pattern)
#[async_trait]
pub trait ExchangeClient: Send + Sync {
    /// Latest price for a trading-pair symbol (e.g. `DOGEUSDT`)
    async fn get_price(&self, symbol: &str) -> Result<Decimal>;

    /// Exchange name
    fn name(&self) -> &str;
}
