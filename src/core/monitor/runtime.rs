//! The monitoring loop: sample, evaluate, dispatch, sleep.
//!
//! The loop only stops when a shutdown signal arrives. It is checked while
//! sleeping between ticks and between notifications within a tick.

use std::time::Duration;

use tokio::sync::broadcast::{self, error::TryRecvError};

use super::dispatcher::{DispatchOutcome, Dispatcher, Notifier};
use super::rules::{evaluate_rules, Rule};
use super::sampler::{CounterSource, Sampler};

pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    Stopped,
    Running,
}

/// Counts for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub triggered: usize,
    pub delivered: usize,
    pub failed: usize,
    pub cancelled: bool,
}

/// Totals over a whole run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonitorSummary {
    pub ticks: u64,
    pub triggered: u64,
    pub delivered: u64,
    pub failed: u64,
}

impl MonitorSummary {
    fn add(&mut self, report: &TickReport) {
        self.ticks += 1;
        self.triggered += report.triggered as u64;
        self.delivered += report.delivered as u64;
        self.failed += report.failed as u64;
    }
}

/// Ties a [`Sampler`], a rule set and a [`Dispatcher`] together.
pub struct Monitor<S, N> {
    sampler: Sampler<S>,
    rules: Vec<Rule>,
    dispatcher: Dispatcher<N>,
    interval: Duration,
    state: MonitorState,
}

impl<S: CounterSource, N: Notifier> Monitor<S, N> {
    pub fn new(sampler: Sampler<S>, rules: Vec<Rule>, dispatcher: Dispatcher<N>) -> Self {
        Self {
            sampler,
            rules,
            dispatcher,
            interval: DEFAULT_INTERVAL,
            state: MonitorState::Stopped,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn state(&self) -> MonitorState {
        self.state
    }

    /// Run one tick. Notifications go out one at a time in rule order.
    pub async fn tick(&mut self, shutdown: &mut broadcast::Receiver<()>) -> TickReport {
        let snapshot = self.sampler.sample();
        if snapshot.is_empty() {
            log::warn!("No metrics could be read this tick");
        } else {
            log::trace!("Sampled {} metrics at {}", snapshot.len(), snapshot.taken_at);
        }

        let mut report = TickReport::default();
        for triggered in evaluate_rules(&snapshot, &self.rules) {
            if shutdown_requested(shutdown) {
                report.cancelled = true;
                break;
            }

            report.triggered += 1;
            log::info!(
                "Alert triggered: {} with value {:.2}",
                triggered.rule.name,
                triggered.value
            );

            match self.dispatcher.send(&triggered).await {
                DispatchOutcome::Delivered => report.delivered += 1,
                DispatchOutcome::Failed(_) => report.failed += 1,
            }
        }

        log::debug!(
            "Tick done: {} triggered, {} delivered, {} failed",
            report.triggered,
            report.delivered,
            report.failed
        );
        report
    }

    /// Loop until `shutdown` fires (or its sender goes away).
    pub async fn run(&mut self, mut shutdown: broadcast::Receiver<()>) -> MonitorSummary {
        self.state = MonitorState::Running;
        log::info!(
            "Starting system monitor with {} alert(s), checking every {}s",
            self.rules.len(),
            self.interval.as_secs_f64()
        );

        let mut summary = MonitorSummary::default();
        loop {
            let report = self.tick(&mut shutdown).await;
            summary.add(&report);
            if report.cancelled {
                break;
            }

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = shutdown.recv() => break,
            }
        }

        self.state = MonitorState::Stopped;
        log::info!("System monitor stopped after {} tick(s)", summary.ticks);
        summary
    }
}

fn shutdown_requested(shutdown: &mut broadcast::Receiver<()>) -> bool {
    !matches!(shutdown.try_recv(), Err(TryRecvError::Empty))
}
