//! Paper trading account used when no exchange integration is wired in.

use rust_decimal::Decimal;
use serde::Deserialize;

/// One asset of the paper account.
#[derive(Debug, Clone, Deserialize)]
pub struct PaperAsset {
    pub symbol: String,
    /// Units held at startup.
    #[serde(default)]
    pub amount: Decimal,
    /// Price in the base currency.
    pub price: Decimal,
    /// Target index weight; assets without one are held but not bought.
    #[serde(default)]
    pub index_weight: Option<Decimal>,
}

/// Paper account configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaperConfig {
    /// Cash available in the base currency.
    #[serde(default)]
    pub cash: Decimal,
    #[serde(default)]
    pub assets: Vec<PaperAsset>,
}
