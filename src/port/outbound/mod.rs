//! Outbound ports (driven side).

mod analytics;
mod chat;
mod credentials;
mod trading;

pub use analytics::{AnalyticsError, Chart, ChartKind, ChartPoint, PortfolioAnalytics};
pub use chat::{ChatTransport, Keyboard, Reply, ReplyFormat, TransportError};
pub use credentials::CredentialVerifier;
pub use trading::{TradingBot, TradingError};
