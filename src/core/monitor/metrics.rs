use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::WarlockError;

/// The fixed set of metrics the sampler produces and rules may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Metric {
    #[serde(rename = "cpu_percent")]
    CpuPercent,
    #[serde(rename = "memory_percent")]
    MemoryPercent,
    #[serde(rename = "swap_percent")]
    SwapPercent,
    #[serde(rename = "disk_percent_root")]
    DiskPercentRoot,
    #[serde(rename = "disk_read_MBps")]
    DiskReadMbps,
    #[serde(rename = "disk_write_MBps")]
    DiskWriteMbps,
    #[serde(rename = "net_sent_MBps")]
    NetSentMbps,
    #[serde(rename = "net_recv_MBps")]
    NetRecvMbps,
    #[serde(rename = "process_count")]
    ProcessCount,
    #[serde(rename = "uptime_minutes")]
    UptimeMinutes,
}

impl Metric {
    /// Every metric, in display order
    pub const ALL: [Metric; 10] = [
        Metric::CpuPercent,
        Metric::MemoryPercent,
        Metric::SwapPercent,
        Metric::DiskPercentRoot,
        Metric::DiskReadMbps,
        Metric::DiskWriteMbps,
        Metric::NetSentMbps,
        Metric::NetRecvMbps,
        Metric::ProcessCount,
        Metric::UptimeMinutes,
    ];

    /// Name used in config files, notifications and the CLI
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::CpuPercent => "cpu_percent",
            Metric::MemoryPercent => "memory_percent",
            Metric::SwapPercent => "swap_percent",
            Metric::DiskPercentRoot => "disk_percent_root",
            Metric::DiskReadMbps => "disk_read_MBps",
            Metric::DiskWriteMbps => "disk_write_MBps",
            Metric::NetSentMbps => "net_sent_MBps",
            Metric::NetRecvMbps => "net_recv_MBps",
            Metric::ProcessCount => "process_count",
            Metric::UptimeMinutes => "uptime_minutes",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Metric::CpuPercent => "CPU load over a 1 second window (%)",
            Metric::MemoryPercent => "Physical memory in use (%)",
            Metric::SwapPercent => "Swap in use (%)",
            Metric::DiskPercentRoot => "Root filesystem usage (%)",
            Metric::DiskReadMbps => "Disk reads since the previous tick (MB)",
            Metric::DiskWriteMbps => "Disk writes since the previous tick (MB)",
            Metric::NetSentMbps => "Network bytes sent since the previous tick (MB)",
            Metric::NetRecvMbps => "Network bytes received since the previous tick (MB)",
            Metric::ProcessCount => "Running processes",
            Metric::UptimeMinutes => "Minutes since boot",
        }
    }

    /// Comma separated list of every metric name, for prompts and error messages
    pub fn names() -> String {
        Metric::ALL
            .iter()
            .map(Metric::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = WarlockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .iter()
            .copied()
            .find(|metric| metric.as_str() == s)
            .ok_or_else(|| {
                WarlockError::invalid_rule(format!(
                    "unknown metric '{}' (expected one of: {})",
                    s,
                    Metric::names()
                ))
            })
    }
}

/// Metric values produced by one sampling tick.
///
/// Metrics whose reading failed are simply absent.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSnapshot {
    pub taken_at: DateTime<Utc>,
    values: BTreeMap<Metric, f64>,
}

impl MetricSnapshot {
    pub fn new(values: BTreeMap<Metric, f64>) -> Self {
        Self {
            taken_at: Utc::now(),
            values,
        }
    }

    pub fn get(&self, metric: Metric) -> Option<f64> {
        self.values.get(&metric).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(Metric, f64)> for MetricSnapshot {
    fn from_iter<I: IntoIterator<Item = (Metric, f64)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
