//! Portfolio analytics port.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::trading::TradingError;

/// Failure while building a chart.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("analytics unavailable: {0}")]
pub struct AnalyticsError(pub String);

impl From<TradingError> for AnalyticsError {
    fn from(err: TradingError) -> Self {
        Self(err.to_string())
    }
}

/// Chart flavour, used by the dashboard to pick a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Pie,
    Line,
}

/// One labelled data point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: Decimal,
}

/// Renderer-agnostic chart description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    pub title: String,
    pub kind: ChartKind,
    pub points: Vec<ChartPoint>,
}

impl Chart {
    #[must_use]
    pub fn new(title: impl Into<String>, kind: ChartKind, points: Vec<ChartPoint>) -> Self {
        Self {
            title: title.into(),
            kind,
            points,
        }
    }
}

/// Chart provider for the dashboard. Called on every refresh tick.
#[async_trait]
pub trait PortfolioAnalytics: Send + Sync {
    async fn allocation_pie(&self) -> Result<Chart, AnalyticsError>;

    async fn performance_chart(&self) -> Result<Chart, AnalyticsError>;
}
