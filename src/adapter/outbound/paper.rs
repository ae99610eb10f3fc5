//! Paper trading account.
//!
//! Simulates an exchange from configured prices so the bot and dashboard
//! run without exchange credentials. Prices never move; orders fill at the
//! configured price as long as there is cash.

use async_trait::async_trait;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::domain::{Holdings, IndexWeights, OrderReport};
use crate::infrastructure::config::paper::{PaperAsset, PaperConfig};
use crate::port::{TradingBot, TradingError};

#[derive(Debug)]
struct Account {
    cash: Decimal,
    assets: Vec<PaperAsset>,
}

impl Account {
    fn asset_mut(&mut self, symbol: &str) -> Option<&mut PaperAsset> {
        self.assets
            .iter_mut()
            .find(|a| a.symbol.eq_ignore_ascii_case(symbol))
    }
}

/// In-memory [`TradingBot`].
#[derive(Debug)]
pub struct PaperTradingBot {
    account: Mutex<Account>,
    budget: Decimal,
    base_symbol: String,
}

impl PaperTradingBot {
    /// Create an account from `config`; each order spends `budget`.
    #[must_use]
    pub fn new(config: &PaperConfig, budget: Decimal, base_symbol: impl Into<String>) -> Self {
        Self {
            account: Mutex::new(Account {
                cash: config.cash,
                assets: config.assets.clone(),
            }),
            budget,
            base_symbol: base_symbol.into().to_uppercase(),
        }
    }

    /// Cash left in the base currency.
    #[must_use]
    pub fn cash(&self) -> Decimal {
        self.account.lock().cash
    }

    fn holdings(&self, index_only: bool) -> Holdings {
        let account = self.account.lock();
        let mut rows: Vec<_> = account
            .assets
            .iter()
            .filter(|a| !index_only || a.index_weight.is_some())
            .filter(|a| !a.amount.is_zero())
            .map(|a| (a.symbol.to_uppercase(), a.amount, a.amount * a.price))
            .collect();

        if !index_only && !account.cash.is_zero() {
            rows.push((self.base_symbol.clone(), account.cash, account.cash));
        }

        Holdings::from_values(rows)
    }
}

#[async_trait]
impl TradingBot for PaperTradingBot {
    async fn balance(&self) -> Result<Holdings, TradingError> {
        Ok(self.holdings(false))
    }

    async fn index_balance(&self) -> Result<Holdings, TradingError> {
        Ok(self.holdings(true))
    }

    async fn fetch_index_weights(&self) -> Result<IndexWeights, TradingError> {
        let account = self.account.lock();
        let weights: Vec<_> = account
            .assets
            .iter()
            .filter_map(|a| a.index_weight.map(|w| (a.symbol.to_lowercase(), w)))
            .collect();

        if weights.is_empty() {
            return Err(TradingError::Exchange(
                "no index weights configured for the paper account".to_string(),
            ));
        }
        Ok(IndexWeights::new(weights))
    }

    async fn weighted_buy_order(
        &self,
        weights: &IndexWeights,
    ) -> Result<OrderReport, TradingError> {
        let mut account = self.account.lock();
        let mut problems = Vec::new();

        for (symbol, weight) in weights.entries() {
            let cost = *weight * self.budget;
            if cost.is_zero() {
                continue;
            }
            if cost > account.cash {
                problems.push((symbol.to_uppercase(), "insufficient funds".to_string()));
                continue;
            }

            let Some(asset) = account.asset_mut(symbol) else {
                problems.push((symbol.to_uppercase(), "unknown market".to_string()));
                continue;
            };
            if asset.price <= Decimal::ZERO {
                problems.push((symbol.to_uppercase(), "no price available".to_string()));
                continue;
            }

            let bought = cost / asset.price;
            asset.amount += bought;
            account.cash -= cost;
            debug!(symbol = %symbol, %bought, %cost, "Paper order filled");
        }

        info!(
            problems = problems.len(),
            cash = %account.cash,
            "Paper weighted buy order finished"
        );

        if problems.is_empty() {
            Ok(OrderReport::success())
        } else {
            Ok(OrderReport::with_symbol_problems(problems))
        }
    }
}
