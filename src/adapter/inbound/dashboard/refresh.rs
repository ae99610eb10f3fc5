//! Periodic chart refresh.
//!
//! Each widget has its own tokio interval task. A tick re-fetches one chart
//! from [`PortfolioAnalytics`] and replaces the cached copy served to the
//! browser. Failed refreshes keep the previous chart.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::infrastructure::config::dashboard::DashboardConfig;
use crate::port::{AnalyticsError, Chart, PortfolioAnalytics};

/// Dashboard chart widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Widget {
    Allocation,
    Performance,
}

impl Widget {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Allocation => "allocation",
            Self::Performance => "performance",
        }
    }

    async fn fetch(self, analytics: &dyn PortfolioAnalytics) -> Result<Chart, AnalyticsError> {
        match self {
            Self::Allocation => analytics.allocation_pie().await,
            Self::Performance => analytics.performance_chart().await,
        }
    }
}

/// Refresh periods of the two widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshSchedule {
    pub allocation: Duration,
    pub performance: Duration,
}

impl RefreshSchedule {
    #[must_use]
    pub const fn period(&self, widget: Widget) -> Duration {
        match widget {
            Widget::Allocation => self.allocation,
            Widget::Performance => self.performance,
        }
    }
}

impl Default for RefreshSchedule {
    fn default() -> Self {
        Self {
            allocation: Duration::from_secs(20),
            performance: Duration::from_secs(300),
        }
    }
}

impl From<&DashboardConfig> for RefreshSchedule {
    fn from(config: &DashboardConfig) -> Self {
        Self {
            allocation: config.allocation_refresh(),
            performance: config.performance_refresh(),
        }
    }
}

/// Last rendered chart of a widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CachedChart {
    pub chart: Chart,
    pub refreshed_at: DateTime<Utc>,
}

/// Latest chart per widget.
#[derive(Debug, Default)]
pub struct ChartCache {
    allocation: RwLock<Option<CachedChart>>,
    performance: RwLock<Option<CachedChart>>,
}

impl ChartCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, widget: Widget) -> &RwLock<Option<CachedChart>> {
        match widget {
            Widget::Allocation => &self.allocation,
            Widget::Performance => &self.performance,
        }
    }

    #[must_use]
    pub fn get(&self, widget: Widget) -> Option<CachedChart> {
        self.slot(widget).read().clone()
    }

    pub fn store(&self, widget: Widget, chart: Chart) {
        *self.slot(widget).write() = Some(CachedChart {
            chart,
            refreshed_at: Utc::now(),
        });
    }
}

/// Fetch one widget's chart and cache it.
pub async fn refresh_once(
    analytics: &dyn PortfolioAnalytics,
    cache: &ChartCache,
    widget: Widget,
) -> Result<(), AnalyticsError> {
    let chart = widget.fetch(analytics).await?;
    debug!(widget = widget.name(), points = chart.points.len(), "Chart refreshed");
    cache.store(widget, chart);
    Ok(())
}

/// Handles of the running refresh tasks. Dropping does not stop them.
#[derive(Debug)]
pub struct RefreshTasks {
    allocation: JoinHandle<()>,
    performance: JoinHandle<()>,
}

impl RefreshTasks {
    pub fn abort(&self) {
        self.allocation.abort();
        self.performance.abort();
    }
}

fn spawn_widget(
    analytics: Arc<dyn PortfolioAnalytics>,
    cache: Arc<ChartCache>,
    widget: Widget,
    period: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        // First tick completes immediately so charts exist before the first poll
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            if let Err(e) = refresh_once(analytics.as_ref(), &cache, widget).await {
                warn!(widget = widget.name(), error = %e, "Chart refresh failed");
            }
        }
    })
}

/// Start one refresh task per widget.
#[must_use]
pub fn spawn_refresh(
    analytics: Arc<dyn PortfolioAnalytics>,
    cache: Arc<ChartCache>,
    schedule: RefreshSchedule,
) -> RefreshTasks {
    RefreshTasks {
        allocation: spawn_widget(
            Arc::clone(&analytics),
            Arc::clone(&cache),
            Widget::Allocation,
            schedule.allocation,
        ),
        performance: spawn_widget(analytics, cache, Widget::Performance, schedule.performance),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::analytics::StubAnalytics;
    use rust_decimal::Decimal;

    fn latest_value(cache: &ChartCache, widget: Widget) -> Option<Decimal> {
        cache.get(widget).map(|c| c.chart.points[0].value)
    }

    #[test]
    fn default_schedule_is_twenty_seconds_and_five_minutes() {
        let schedule = RefreshSchedule::default();
        assert_eq!(schedule.period(Widget::Allocation), Duration::from_secs(20));
        assert_eq!(schedule.period(Widget::Performance), Duration::from_secs(300));
        assert_eq!(RefreshSchedule::from(&DashboardConfig::default()), schedule);
    }

    #[tokio::test]
    async fn refresh_once_touches_only_its_widget() {
        let analytics = StubAnalytics::new();
        let cache = ChartCache::new();

        refresh_once(&analytics, &cache, Widget::Performance)
            .await
            .unwrap();

        assert!(cache.get(Widget::Allocation).is_none());
        assert_eq!(latest_value(&cache, Widget::Performance), Some(Decimal::ONE));
        assert_eq!(analytics.allocation_calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn widgets_refresh_on_independent_timers() {
        let analytics = Arc::new(StubAnalytics::new());
        let cache = Arc::new(ChartCache::new());
        let tasks = spawn_refresh(analytics.clone(), cache.clone(), RefreshSchedule::default());

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(analytics.allocation_calls(), 1);
        assert_eq!(analytics.performance_calls(), 1);

        tokio::time::sleep(Duration::from_secs(20)).await;
        assert_eq!(analytics.allocation_calls(), 2);
        assert_eq!(analytics.performance_calls(), 1);

        tokio::time::sleep(Duration::from_secs(280)).await;
        assert_eq!(analytics.allocation_calls(), 16);
        assert_eq!(analytics.performance_calls(), 2);
        assert_eq!(latest_value(&cache, Widget::Allocation), Some(Decimal::from(16)));

        tasks.abort();
    }
}
