//! Builders for domain primitives used across tests.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::{ChatId, Holdings, IndexWeights};
use crate::infrastructure::config::savings_plan::SavingsPlanConfig;

/// The chat the bot under test is authorized for.
pub const AUTHORIZED_CHAT: ChatId = ChatId::new(4242);

/// Some other chat.
pub const STRANGER_CHAT: ChatId = ChatId::new(1337);

/// A three-asset index: 60% BTC, 30% ETH, 10% ADA.
#[must_use]
pub fn index_weights() -> IndexWeights {
    IndexWeights::new(vec![
        ("btc".to_string(), dec!(0.6)),
        ("eth".to_string(), dec!(0.3)),
        ("ada".to_string(), dec!(0.1)),
    ])
}

/// A small balance worth 1,500.
#[must_use]
pub fn holdings() -> Holdings {
    Holdings::from_values(vec![
        ("BTC".to_string(), dec!(0.03), dec!(1200)),
        ("ETH".to_string(), dec!(0.1), dec!(300)),
    ])
}

/// Savings plan spending `cost` USD on Kraken.
#[must_use]
pub fn savings_plan(cost: Decimal) -> SavingsPlanConfig {
    SavingsPlanConfig {
        cost,
        base_symbol: "usd".to_string(),
        exchange: "Kraken".to_string(),
    }
}
