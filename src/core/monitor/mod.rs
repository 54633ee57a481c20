//! Host monitoring core.
//!
//! A [`Sampler`] turns OS counters into a [`MetricSnapshot`], rules are
//! evaluated against it, and triggered rules are delivered through a
//! [`Dispatcher`]. [`Monitor`] repeats this until shut down.

mod dispatcher;
mod metrics;
mod rules;
mod runtime;
mod sampler;
mod source;
mod telegram;

pub use dispatcher::{format_message, DispatchOutcome, Dispatcher, Notifier};
pub use metrics::{Metric, MetricSnapshot};
pub use rules::{evaluate_rules, rules_from_records, Comparator, Rule, RuleRecord, TriggeredRule};
pub use runtime::{Monitor, MonitorState, MonitorSummary, TickReport, DEFAULT_INTERVAL};
pub use sampler::{
    rate_mb, CounterSource, CounterState, DiskIoCounters, NetIoCounters, Sampler,
    CPU_SAMPLE_WINDOW,
};
pub use source::SysinfoSource;
pub use telegram::{TelegramNotifier, TELEGRAM_API_BASE};
