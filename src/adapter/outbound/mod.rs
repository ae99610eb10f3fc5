//! Outbound adapters (driven side).

pub mod analytics;
pub mod paper;

pub use analytics::HoldingsAnalytics;
pub use paper::PaperTradingBot;
