//! Portfolio analytics computed from exchange holdings.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rust_decimal::Decimal;

use crate::domain::Holdings;
use crate::port::{AnalyticsError, Chart, ChartKind, ChartPoint, PortfolioAnalytics, TradingBot};

/// Snapshots kept for the performance chart (one week at 5 minute ticks).
pub const DEFAULT_SNAPSHOT_CAPACITY: usize = 7 * 24 * 12;

/// Builds charts from [`TradingBot::balance`].
///
/// Every performance request records the current portfolio value, so the
/// line chart grows with the refresh schedule.
pub struct HoldingsAnalytics {
    trading: Arc<dyn TradingBot>,
    snapshots: Mutex<VecDeque<(DateTime<Utc>, Decimal)>>,
    capacity: usize,
}

impl HoldingsAnalytics {
    #[must_use]
    pub fn new(trading: Arc<dyn TradingBot>) -> Self {
        Self::with_capacity(trading, DEFAULT_SNAPSHOT_CAPACITY)
    }

    #[must_use]
    pub fn with_capacity(trading: Arc<dyn TradingBot>, capacity: usize) -> Self {
        Self {
            trading,
            snapshots: Mutex::new(VecDeque::new()),
            capacity: capacity.max(1),
        }
    }

    fn record(&self, at: DateTime<Utc>, holdings: &Holdings) -> Vec<ChartPoint> {
        let mut snapshots = self.snapshots.lock();
        if snapshots.len() == self.capacity {
            snapshots.pop_front();
        }
        snapshots.push_back((at, holdings.total_value()));

        snapshots
            .iter()
            .map(|(at, value)| ChartPoint {
                label: at.format("%Y-%m-%d %H:%M").to_string(),
                value: *value,
            })
            .collect()
    }
}

#[async_trait]
impl PortfolioAnalytics for HoldingsAnalytics {
    async fn allocation_pie(&self) -> Result<Chart, AnalyticsError> {
        let holdings = self.trading.balance().await?;
        let points = holdings
            .entries()
            .iter()
            .map(|h| ChartPoint {
                label: h.symbol.clone(),
                value: h.value,
            })
            .collect();
        Ok(Chart::new("Allocation", ChartKind::Pie, points))
    }

    async fn performance_chart(&self) -> Result<Chart, AnalyticsError> {
        let holdings = self.trading.balance().await?;
        let points = self.record(Utc::now(), &holdings);
        Ok(Chart::new("Portfolio value", ChartKind::Line, points))
    }
}
