//! Portfolio snapshots and order outcomes exchanged with the trading service.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of a balance snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Asset symbol, e.g. `BTC`.
    pub symbol: String,
    /// Units held.
    pub amount: Decimal,
    /// Value in the quote currency.
    pub value: Decimal,
    /// Share of the total value in percent.
    pub allocation: Decimal,
}

/// Balance snapshot as returned by the trading service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Holdings {
    entries: Vec<Holding>,
}

impl Holdings {
    #[must_use]
    pub fn new(entries: Vec<Holding>) -> Self {
        Self { entries }
    }

    /// Build a snapshot from (symbol, amount, value) rows, deriving allocations.
    #[must_use]
    pub fn from_values(rows: impl IntoIterator<Item = (String, Decimal, Decimal)>) -> Self {
        let rows: Vec<_> = rows.into_iter().collect();
        let total: Decimal = rows.iter().map(|(_, _, value)| *value).sum();

        let entries = rows
            .into_iter()
            .map(|(symbol, amount, value)| {
                let allocation = if total.is_zero() {
                    Decimal::ZERO
                } else {
                    value / total * Decimal::ONE_HUNDRED
                };
                Holding {
                    symbol,
                    amount,
                    value,
                    allocation,
                }
            })
            .collect();

        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[Holding] {
        &self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all holding values.
    #[must_use]
    pub fn total_value(&self) -> Decimal {
        self.entries.iter().map(|h| h.value).sum()
    }
}

/// Target allocation fractions per symbol, summing to 1.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexWeights {
    entries: Vec<(String, Decimal)>,
}

impl IndexWeights {
    #[must_use]
    pub fn new(entries: Vec<(String, Decimal)>) -> Self {
        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[(String, Decimal)] {
        &self.entries
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(symbol, _)| symbol.as_str())
    }

    #[must_use]
    pub fn total(&self) -> Decimal {
        self.entries.iter().map(|(_, weight)| *weight).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Outcome of a weighted buy order.
///
/// `occurred` flags that at least one problem prevented the order. Problems
/// are either per symbol (`symbols`) or for the whole operation (`description`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderReport {
    pub occurred: bool,
    pub symbols: Vec<(String, String)>,
    pub description: String,
}

impl OrderReport {
    /// A report without problems.
    #[must_use]
    pub fn success() -> Self {
        Self::default()
    }

    /// A report listing per-symbol problems.
    #[must_use]
    pub fn with_symbol_problems(problems: Vec<(String, String)>) -> Self {
        Self {
            occurred: true,
            symbols: problems,
            description: String::new(),
        }
    }

    /// A report with a single problem affecting the whole operation.
    #[must_use]
    pub fn failed(description: impl Into<String>) -> Self {
        Self {
            occurred: true,
            symbols: Vec::new(),
            description: description.into(),
        }
    }
}
