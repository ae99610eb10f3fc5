//! Scriptable trading bot double.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::{Holdings, IndexWeights, OrderReport};
use crate::port::{TradingBot, TradingError};

/// Trading bot returning canned results.
///
/// Each method has a default result; queued results are consumed first so
/// tests can script failure sequences.
#[derive(Debug)]
pub struct MockTradingBot {
    holdings: Holdings,
    weights: IndexWeights,
    order_report: Mutex<Result<OrderReport, TradingError>>,
    balance_script: Mutex<VecDeque<Result<Holdings, TradingError>>>,
    weights_script: Mutex<VecDeque<Result<IndexWeights, TradingError>>>,
    balance_calls: AtomicUsize,
    weights_calls: AtomicUsize,
    submitted: Mutex<Vec<IndexWeights>>,
}

impl MockTradingBot {
    #[must_use]
    pub fn new(holdings: Holdings, weights: IndexWeights) -> Self {
        Self {
            holdings,
            weights,
            order_report: Mutex::new(Ok(OrderReport::success())),
            balance_script: Mutex::new(VecDeque::new()),
            weights_script: Mutex::new(VecDeque::new()),
            balance_calls: AtomicUsize::new(0),
            weights_calls: AtomicUsize::new(0),
            submitted: Mutex::new(Vec::new()),
        }
    }

    /// Result returned by every weighted buy order.
    pub fn set_order_result(&self, result: Result<OrderReport, TradingError>) {
        *self.order_report.lock() = result;
    }

    /// Queue a result for the next `balance`/`index_balance` call.
    pub fn push_balance(&self, result: Result<Holdings, TradingError>) {
        self.balance_script.lock().push_back(result);
    }

    /// Queue a result for the next `fetch_index_weights` call.
    pub fn push_weights(&self, result: Result<IndexWeights, TradingError>) {
        self.weights_script.lock().push_back(result);
    }

    #[must_use]
    pub fn balance_calls(&self) -> usize {
        self.balance_calls.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn weights_calls(&self) -> usize {
        self.weights_calls.load(Ordering::SeqCst)
    }

    /// Weights passed to `weighted_buy_order`, in call order.
    #[must_use]
    pub fn submitted_orders(&self) -> Vec<IndexWeights> {
        self.submitted.lock().clone()
    }

    fn next_balance(&self) -> Result<Holdings, TradingError> {
        self.balance_calls.fetch_add(1, Ordering::SeqCst);
        self.balance_script
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(self.holdings.clone()))
    }
}

#[async_trait]
impl TradingBot for MockTradingBot {
    async fn balance(&self) -> Result<Holdings, TradingError> {
        self.next_balance()
    }

    async fn index_balance(&self) -> Result<Holdings, TradingError> {
        self.next_balance()
    }

    async fn fetch_index_weights(&self) -> Result<IndexWeights, TradingError> {
        self.weights_calls.fetch_add(1, Ordering::SeqCst);
        self.weights_script
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(self.weights.clone()))
    }

    async fn weighted_buy_order(
        &self,
        weights: &IndexWeights,
    ) -> Result<OrderReport, TradingError> {
        self.submitted.lock().push(weights.clone());
        self.order_report.lock().clone()
    }
}
