//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`trading`] - Scriptable [`TradingBot`](crate::port::TradingBot) double.
//! - [`transport`] - [`ChatTransport`](crate::port::ChatTransport) that records replies.
//! - [`analytics`] - Counting [`PortfolioAnalytics`](crate::port::PortfolioAnalytics) stub.
//! - [`domain`] - Builders for domain primitives and settings.

pub mod analytics;
pub mod domain;
pub mod trading;
pub mod transport;
