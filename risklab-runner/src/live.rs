//! Live loop — the per-bar session driven by a market feed.
//!
//! The same `Session` that powers backtests runs here; only the bar source
//! and the fill source differ. Fills come from an execution client, with
//! the cost model as fallback pricing when no fill report is available.
//! Cancellation is cooperative: the stop flag is checked between ticks
//! only, so a tick in flight always completes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use risklab_core::domain::{Bar, OrderSide, PositionSide};
use risklab_core::engine::{FillSource, SkippedEntry};
use risklab_core::execution::CostModel;
use risklab_core::risk::RiskConfig;
use risklab_core::strategy::Strategy;

use risklab_core::engine::Session;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("market feed disconnected")]
    Disconnected,
    #[error("malformed bar from feed: {0}")]
    Malformed(String),
}

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("order rejected: {0}")]
    Rejected(String),
    #[error("execution client disconnected")]
    Disconnected,
}

/// Source of market bars.
///
/// `Ok(None)` means no new bar yet; the loop idles and polls again.
pub trait MarketFeed {
    fn next_bar(&mut self) -> Result<Option<Bar>, FeedError>;
}

/// Order placement endpoint. Returns the reported fill price.
pub trait ExecutionClient {
    fn place_market_order(&mut self, side: OrderSide, quantity: f64) -> Result<f64, ExecError>;
}

/// Client-backed fills with cost-model fallback pricing.
pub struct LiveFills {
    client: Box<dyn ExecutionClient>,
    model: CostModel,
    fallback_fills: usize,
}

impl LiveFills {
    pub fn new(client: Box<dyn ExecutionClient>, model: CostModel) -> Self {
        Self {
            client,
            model,
            fallback_fills: 0,
        }
    }

    /// Number of fills priced from the model because the client reported
    /// an error.
    pub fn fallback_fills(&self) -> usize {
        self.fallback_fills
    }
}

impl FillSource for LiveFills {
    fn entry_fill(&mut self, nominal: f64, side: PositionSide, quantity: f64) -> f64 {
        match self.client.place_market_order(side.entry_order(), quantity) {
            Ok(price) => price,
            Err(_) => {
                self.fallback_fills += 1;
                self.model.entry_fill(nominal, side)
            }
        }
    }

    fn exit_fill(&mut self, nominal: f64, side: PositionSide, quantity: f64, is_stop: bool) -> f64 {
        match self.client.place_market_order(side.exit_order(), quantity) {
            Ok(price) => price,
            Err(_) => {
                self.fallback_fills += 1;
                self.model.exit_fill(nominal, side, is_stop)
            }
        }
    }
}

/// Whether a tick consumed a bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Processed,
    NoNewBar,
}

/// Drives a session bar by bar from a market feed.
pub struct LiveLoop {
    session: Session,
    strategy: Box<dyn Strategy>,
    feed: Box<dyn MarketFeed>,
    fills: LiveFills,
    history: Vec<Bar>,
    warmup: usize,
    skipped: Vec<SkippedEntry>,
    stop: Arc<AtomicBool>,
}

impl LiveLoop {
    pub fn new(
        initial_balance: f64,
        warmup_bars: usize,
        risk: RiskConfig,
        strategy: Box<dyn Strategy>,
        feed: Box<dyn MarketFeed>,
        fills: LiveFills,
    ) -> Self {
        let warmup = warmup_bars.max(strategy.warmup_bars());
        Self {
            session: Session::new(initial_balance, risk),
            strategy,
            feed,
            fills,
            history: Vec::new(),
            warmup,
            skipped: Vec::new(),
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Handle for requesting a stop from another thread.
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn skipped(&self) -> &[SkippedEntry] {
        &self.skipped
    }

    pub fn fills(&self) -> &LiveFills {
        &self.fills
    }

    /// Poll the feed once and process the bar if one arrived.
    pub fn tick(&mut self) -> Result<TickOutcome, FeedError> {
        let Some(bar) = self.feed.next_bar()? else {
            return Ok(TickOutcome::NoNewBar);
        };
        if !bar.is_sane() {
            return Err(FeedError::Malformed(format!(
                "bar at {} has inconsistent prices",
                bar.timestamp
            )));
        }
        self.history.push(bar);
        let t = self.history.len() - 1;
        if t >= self.warmup {
            let skips = self
                .session
                .process_bar(&self.history, t, self.strategy.as_ref(), &mut self.fills);
            self.skipped.extend(skips);
        }
        Ok(TickOutcome::Processed)
    }

    /// Run until the stop flag is set, idling `poll_interval` when the feed
    /// has no new bar. The flag is only observed between ticks.
    pub fn run(&mut self, poll_interval: Duration) -> Result<(), FeedError> {
        while !self.stop.load(Ordering::Relaxed) {
            match self.tick()? {
                TickOutcome::Processed => {}
                TickOutcome::NoNewBar => std::thread::sleep(poll_interval),
            }
        }
        Ok(())
    }

    /// Close every open position at the last seen bar.
    pub fn close_all(&mut self) {
        if let Some(bar) = self.history.last().cloned() {
            self.session.close_all(&bar, &mut self.fills);
        }
    }
}
