//! Savings-plan purchase plans.

use rust_decimal::Decimal;

use super::portfolio::IndexWeights;

/// One symbol's share of a savings-plan purchase.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanLine {
    pub symbol: String,
    pub weight: Decimal,
    pub cost: Decimal,
}

/// Purchase plan awaiting the user's confirmation.
///
/// Lives only for the duration of one conversation and is never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingOrderPlan {
    weights: IndexWeights,
    lines: Vec<PlanLine>,
    budget: Decimal,
    currency: String,
}

impl PendingOrderPlan {
    /// Distribute `budget` across the index according to `weights`.
    #[must_use]
    pub fn compute(weights: IndexWeights, budget: Decimal, currency: impl Into<String>) -> Self {
        let lines = weights
            .entries()
            .iter()
            .map(|(symbol, weight)| PlanLine {
                symbol: symbol.clone(),
                weight: *weight,
                cost: *weight * budget,
            })
            .collect();

        Self {
            weights,
            lines,
            budget,
            currency: currency.into(),
        }
    }

    #[must_use]
    pub fn lines(&self) -> &[PlanLine] {
        &self.lines
    }

    /// Weights the plan was computed from; submitted unchanged on confirmation.
    #[must_use]
    pub fn weights(&self) -> &IndexWeights {
        &self.weights
    }

    #[must_use]
    pub fn budget(&self) -> Decimal {
        self.budget
    }

    #[must_use]
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Sum of all line costs.
    #[must_use]
    pub fn total_cost(&self) -> Decimal {
        self.lines.iter().map(|line| line.cost).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn weights() -> IndexWeights {
        IndexWeights::new(vec![
            ("BTC".to_string(), dec!(0.6)),
            ("ETH".to_string(), dec!(0.3)),
            ("ADA".to_string(), dec!(0.1)),
        ])
    }

    #[test]
    fn compute_splits_budget_by_weight() {
        let plan = PendingOrderPlan::compute(weights(), dec!(200), "USD");

        let costs: Vec<_> = plan.lines().iter().map(|l| l.cost).collect();
        assert_eq!(costs, vec![dec!(120), dec!(60), dec!(20)]);
        assert_eq!(plan.total_cost(), dec!(200));
        assert_eq!(plan.currency(), "USD");
    }

    #[test]
    fn compute_keeps_weight_order() {
        let plan = PendingOrderPlan::compute(weights(), dec!(100), "USD");
        let symbols: Vec<_> = plan.lines().iter().map(|l| l.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["BTC", "ETH", "ADA"]);
        assert_eq!(plan.weights(), &weights());
    }

    #[test]
    fn empty_weights_give_empty_plan() {
        let plan = PendingOrderPlan::compute(IndexWeights::default(), dec!(100), "USD");
        assert!(plan.lines().is_empty());
        assert_eq!(plan.total_cost(), Decimal::ZERO);
    }
}
