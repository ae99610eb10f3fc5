//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! # Available Ports
//!
//! - [`TradingBot`] - Balances, index weights and weighted buy orders
//! - [`PortfolioAnalytics`] - Charts for the dashboard
//! - [`ChatTransport`] - Outbound chat replies
//! - [`CredentialVerifier`] - Dashboard login checks

pub mod outbound;

pub use outbound::{
    AnalyticsError, Chart, ChartKind, ChartPoint, ChatTransport, CredentialVerifier, Keyboard,
    PortfolioAnalytics, Reply, ReplyFormat, TradingBot, TradingError, TransportError,
};
