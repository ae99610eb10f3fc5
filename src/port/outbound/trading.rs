//! Trading service port.
//!
//! The exchange-facing bot is an external collaborator: it reports balances,
//! supplies index weights and places weighted buy orders.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Holdings, IndexWeights, OrderReport};

/// Failures reported by the trading service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TradingError {
    /// The exchange rejected or failed the request; the message is forwarded verbatim.
    #[error("{0}")]
    Exchange(String),

    /// A symbol had no market data on the exchange.
    #[error("missing market data for {symbol}")]
    MissingMarketData { symbol: String },

    /// Temporary connectivity problem.
    #[error("network error: {0}")]
    Network(String),
}

impl TradingError {
    /// Only connectivity problems are worth retrying.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// What the exchange side said, without the variant prefix.
    #[must_use]
    pub fn raw_message(&self) -> String {
        match self {
            Self::Exchange(msg) | Self::Network(msg) => msg.clone(),
            Self::MissingMarketData { .. } => self.to_string(),
        }
    }
}

/// Exchange-facing trading bot.
#[async_trait]
pub trait TradingBot: Send + Sync {
    /// Current account balance.
    async fn balance(&self) -> Result<Holdings, TradingError>;

    /// Balance restricted to the symbols of the tracked index.
    async fn index_balance(&self) -> Result<Holdings, TradingError>;

    /// Target weights of the tracked index.
    async fn fetch_index_weights(&self) -> Result<IndexWeights, TradingError>;

    /// Buy the configured savings-plan volume distributed by `weights`.
    async fn weighted_buy_order(&self, weights: &IndexWeights)
        -> Result<OrderReport, TradingError>;
}
