//! Stateful metric sampler.
//!
//! Reads instantaneous values from a [`CounterSource`] and derives per-tick
//! throughput from the cumulative disk and network counters.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::error::Result;

use super::metrics::{Metric, MetricSnapshot};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Window over which CPU load is measured on every tick
pub const CPU_SAMPLE_WINDOW: Duration = Duration::from_secs(1);

/// Cumulative disk I/O totals since boot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiskIoCounters {
    pub read_bytes: u64,
    pub written_bytes: u64,
}

/// Cumulative network totals since boot, summed over all interfaces
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NetIoCounters {
    pub bytes_sent: u64,
    pub bytes_recv: u64,
}

/// Raw OS readings consumed by the [`Sampler`].
///
/// Each reading is independent: an error from one must not prevent the
/// others from being taken.
pub trait CounterSource {
    /// CPU load averaged over `window`. May block for the whole window.
    fn cpu_percent(&mut self, window: Duration) -> Result<f64>;
    fn memory_percent(&mut self) -> Result<f64>;
    fn swap_percent(&mut self) -> Result<f64>;
    fn root_disk_percent(&mut self) -> Result<f64>;
    fn disk_io(&mut self) -> Result<DiskIoCounters>;
    fn net_io(&mut self) -> Result<NetIoCounters>;
    fn process_count(&mut self) -> Result<usize>;
    fn uptime_secs(&mut self) -> Result<u64>;
}

/// Counters observed at the previous tick, `None` if that read failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CounterState {
    pub disk: Option<DiskIoCounters>,
    pub net: Option<NetIoCounters>,
}

/// Produces one [`MetricSnapshot`] per call to [`Sampler::sample`].
pub struct Sampler<S> {
    source: S,
    state: CounterState,
    cpu_window: Duration,
}

impl<S: CounterSource> Sampler<S> {
    /// Create a sampler and take the baseline counter reading.
    pub fn new(source: S) -> Self {
        Self::with_cpu_window(source, CPU_SAMPLE_WINDOW)
    }

    pub fn with_cpu_window(mut source: S, cpu_window: Duration) -> Self {
        let disk = source
            .disk_io()
            .map_err(|e| log::warn!("Baseline disk I/O reading failed: {}", e))
            .ok();
        let net = source
            .net_io()
            .map_err(|e| log::warn!("Baseline network reading failed: {}", e))
            .ok();

        Self {
            source,
            state: CounterState { disk, net },
            cpu_window,
        }
    }

    pub fn counter_state(&self) -> CounterState {
        self.state
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Take one snapshot. Failed readings are logged and left out.
    pub fn sample(&mut self) -> MetricSnapshot {
        let mut values = BTreeMap::new();

        let window = self.cpu_window;
        record(&mut values, Metric::CpuPercent, self.source.cpu_percent(window));
        record(&mut values, Metric::MemoryPercent, self.source.memory_percent());
        record(&mut values, Metric::SwapPercent, self.source.swap_percent());
        record(
            &mut values,
            Metric::DiskPercentRoot,
            self.source.root_disk_percent(),
        );

        self.sample_disk_rates(&mut values);
        self.sample_net_rates(&mut values);

        record(
            &mut values,
            Metric::ProcessCount,
            self.source.process_count().map(|count| count as f64),
        );
        record(
            &mut values,
            Metric::UptimeMinutes,
            self.source.uptime_secs().map(|secs| (secs / 60) as f64),
        );

        MetricSnapshot::new(values)
    }

    fn sample_disk_rates(&mut self, values: &mut BTreeMap<Metric, f64>) {
        let current = match self.source.disk_io() {
            Ok(current) => current,
            Err(e) => {
                log::warn!("Skipping disk throughput metrics: {}", e);
                self.state.disk = None;
                return;
            }
        };

        match self.state.disk {
            Some(previous) => {
                values.insert(
                    Metric::DiskReadMbps,
                    rate_mb(previous.read_bytes, current.read_bytes),
                );
                values.insert(
                    Metric::DiskWriteMbps,
                    rate_mb(previous.written_bytes, current.written_bytes),
                );
            }
            None => log::debug!("No previous disk counters, throughput starts next tick"),
        }

        self.state.disk = Some(current);
    }

    fn sample_net_rates(&mut self, values: &mut BTreeMap<Metric, f64>) {
        let current = match self.source.net_io() {
            Ok(current) => current,
            Err(e) => {
                log::warn!("Skipping network throughput metrics: {}", e);
                self.state.net = None;
                return;
            }
        };

        match self.state.net {
            Some(previous) => {
                values.insert(
                    Metric::NetSentMbps,
                    rate_mb(previous.bytes_sent, current.bytes_sent),
                );
                values.insert(
                    Metric::NetRecvMbps,
                    rate_mb(previous.bytes_recv, current.bytes_recv),
                );
            }
            None => log::debug!("No previous network counters, throughput starts next tick"),
        }

        self.state.net = Some(current);
    }
}

fn record(values: &mut BTreeMap<Metric, f64>, metric: Metric, reading: Result<f64>) {
    match reading {
        Ok(value) => {
            values.insert(metric, value);
        }
        Err(e) => log::warn!("Metric '{}' unavailable this tick: {}", metric, e),
    }
}

/// Megabytes moved between two cumulative readings.
///
/// A counter that went backwards (reset or wrap) yields a negative rate.
pub fn rate_mb(previous: u64, current: u64) -> f64 {
    (current as f64 - previous as f64) / BYTES_PER_MB
}
