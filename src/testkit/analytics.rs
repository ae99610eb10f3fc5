//! Analytics stub counting chart requests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::port::{AnalyticsError, Chart, ChartKind, ChartPoint, PortfolioAnalytics};

/// Returns fixed charts whose single point carries the call count.
#[derive(Debug, Default)]
pub struct StubAnalytics {
    allocation_calls: AtomicUsize,
    performance_calls: AtomicUsize,
}

impl StubAnalytics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn allocation_calls(&self) -> usize {
        self.allocation_calls.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn performance_calls(&self) -> usize {
        self.performance_calls.load(Ordering::SeqCst)
    }
}

fn chart(title: &str, kind: ChartKind, calls: usize) -> Chart {
    Chart::new(
        title,
        kind,
        vec![ChartPoint {
            label: "calls".to_string(),
            value: Decimal::from(calls as u64),
        }],
    )
}

#[async_trait]
impl PortfolioAnalytics for StubAnalytics {
    async fn allocation_pie(&self) -> Result<Chart, AnalyticsError> {
        let calls = self.allocation_calls.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(chart("Allocation", ChartKind::Pie, calls))
    }

    async fn performance_chart(&self) -> Result<Chart, AnalyticsError> {
        let calls = self.performance_calls.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(chart("Performance", ChartKind::Line, calls))
    }
}
