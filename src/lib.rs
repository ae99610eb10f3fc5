//! FundLess - savings-plan control plane for a crypto index portfolio.
//!
//! Glues a trading account to two surfaces: a Telegram bot that runs a
//! confirmed savings-plan purchase, and a web dashboard with session login
//! and periodically refreshed charts.
//!
//! # Modules
//!
//! - [`domain`] - Pure types and state machines: holdings, order plans,
//!   the savings-plan conversation, dashboard navigation
//! - [`port`] - Traits for the trading service, analytics, chat transport
//!   and credential checks
//! - [`adapter`] - Telegram and dashboard surfaces, paper exchange
//! - [`infrastructure`] - Configuration, retries, wiring
//! - [`cli`] - Command-line interface
//! - [`error`] - Error types for the crate
//!
//! # Features
//!
//! - `telegram` (default) - teloxide-based chat bot
//! - `testkit` - Test doubles for integration tests

pub mod adapter;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
