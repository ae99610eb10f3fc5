//! Savings-plan settings shared by the chat bot and the trading service.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Budget and currency of the recurring purchase.
#[derive(Debug, Clone, Deserialize)]
pub struct SavingsPlanConfig {
    /// Amount spent per execution, in `base_symbol`.
    #[serde(default = "default_cost")]
    pub cost: Decimal,
    /// Currency the index is bought with.
    #[serde(default = "default_base_symbol")]
    pub base_symbol: String,
    /// Display name of the exchange the orders are placed on.
    #[serde(default = "default_exchange")]
    pub exchange: String,
}

fn default_cost() -> Decimal {
    Decimal::ONE_HUNDRED
}

fn default_base_symbol() -> String {
    "usd".to_string()
}

fn default_exchange() -> String {
    "Kraken".to_string()
}

impl Default for SavingsPlanConfig {
    fn default() -> Self {
        Self {
            cost: default_cost(),
            base_symbol: default_base_symbol(),
            exchange: default_exchange(),
        }
    }
}
