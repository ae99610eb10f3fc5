//! Reply formatting for chat handlers.

use rust_decimal::Decimal;

use crate::domain::{Holdings, OrderReport, PendingOrderPlan};
use crate::port::{Reply, TradingError};

const RULE: &str = "-------------------------------";
const PLAN_RULE: &str = "---------------------------";

/// Format `value` with `decimals` fraction digits and `,` thousands separators.
#[must_use]
pub fn group_thousands(value: Decimal, decimals: u32) -> String {
    let rounded = value.round_dp(decimals);
    let raw = format!("{:.*}", decimals as usize, rounded.abs());
    let (int_part, frac_part) = match raw.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (raw.as_str(), None),
    };

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 4);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        grouped.push('-');
    }
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*digit);
    }
    if let Some(frac_part) = frac_part {
        grouped.push('.');
        grouped.push_str(frac_part);
    }
    grouped
}

/// Fixed-width balance table.
#[must_use]
pub fn holdings_table(title: &str, holdings: &Holdings) -> String {
    let mut table = format!("{title}\n");
    for holding in holdings.entries() {
        let label = format!("{}:", holding.symbol);
        table.push_str(&format!(
            " {label:<6} {:>6.2}% {:>10}$\n",
            holding.allocation.round_dp(2),
            group_thousands(holding.value, 2)
        ));
    }
    table.push_str(RULE);
    table.push('\n');
    table.push_str(&format!(
        "  Overall Balance: {} $",
        group_thousands(holdings.total_value(), 2)
    ));
    table
}

/// Fixed-width breakdown of a savings-plan purchase.
#[must_use]
pub fn plan_table(plan: &PendingOrderPlan) -> String {
    let mut table = format!("That's what I came up with:\n{PLAN_RULE}");
    for line in plan.lines() {
        let label = format!("{}:", line.symbol.to_uppercase());
        table.push_str(&format!("\n  {label:<6}  {:>6.2} $", line.cost.round_dp(2)));
    }
    table.push_str(&format!("\n{PLAN_RULE}"));
    table.push_str(&format!(
        "\n Sum:  {} $",
        group_thousands(plan.total_cost(), 2)
    ));
    table
}

/// Replies explaining why a balance could not be shown.
#[must_use]
pub fn balance_error_replies(error: &TradingError, exchange: &str) -> Vec<Reply> {
    match error {
        TradingError::MissingMarketData { symbol } => vec![
            Reply::text("Uh ohhh, I had a problem while computing your balances"),
            Reply::text(format!("Could not find {symbol} in market data of {exchange}")),
        ],
        TradingError::Exchange(_) | TradingError::Network(_) => vec![
            Reply::text("I had a problem getting your balance from the exchange!"),
            Reply::text("This is what the exchange returned:"),
            Reply::text(error.raw_message()),
        ],
    }
}

/// Replies for an exchange failure during the savings-plan conversation.
#[must_use]
pub fn plan_error_replies(error: &TradingError) -> Vec<Reply> {
    vec![
        Reply::text("Ohhh, there was a Problem with the exchange! Sorry :(").remove_keyboard(),
        Reply::text("This is what the exchange returned:"),
        Reply::text(error.raw_message()),
        Reply::text("Try to solve it and try again next time"),
        Reply::text("See you :)"),
    ]
}

/// Replies summarizing a weighted buy order.
#[must_use]
pub fn order_report_replies(report: &OrderReport) -> Vec<Reply> {
    if !report.occurred {
        return vec![
            Reply::text("I did it!"),
            Reply::text("Was a pleasure working with you"),
            Reply::text("See you next time!"),
        ];
    }

    let detail = if report.symbols.is_empty() {
        report.description.clone()
    } else {
        let mut msg = "Problematic coins:".to_string();
        for (symbol, reason) in &report.symbols {
            msg.push_str(&format!("\n- {symbol}: {reason}"));
        }
        msg
    };

    vec![
        Reply::text("I can not place your orders!"),
        Reply::text(detail),
        Reply::text("Solve the problems and try again next time!"),
        Reply::text("See you"),
    ]
}
