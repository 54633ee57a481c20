//! Production counter source backed by `sysinfo`.

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use sysinfo::{
    Disks, MemoryRefreshKind, Networks, ProcessRefreshKind, ProcessesToUpdate, RefreshKind,
    System,
};

use crate::error::{Result, WarlockError};

use super::sampler::{CounterSource, DiskIoCounters, NetIoCounters};

#[cfg(windows)]
const ROOT_MOUNT: &str = "C:\\";
#[cfg(not(windows))]
const ROOT_MOUNT: &str = "/";

/// Reads the local host through `sysinfo`.
pub struct SysinfoSource {
    system: System,
    disks: Disks,
    networks: Networks,
}

impl SysinfoSource {
    pub fn new() -> Self {
        let refresh_kind = RefreshKind::nothing().with_memory(MemoryRefreshKind::everything());

        Self {
            system: System::new_with_specifics(refresh_kind),
            disks: Disks::new_with_refreshed_list(),
            networks: Networks::new_with_refreshed_list(),
        }
    }
}

impl Default for SysinfoSource {
    fn default() -> Self {
        Self::new()
    }
}

impl CounterSource for SysinfoSource {
    fn cpu_percent(&mut self, window: Duration) -> Result<f64> {
        self.system.refresh_cpu_usage();
        std::thread::sleep(window.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL));
        self.system.refresh_cpu_usage();

        if self.system.cpus().is_empty() {
            return Err(WarlockError::metric_collection("no CPUs reported"));
        }
        Ok(self.system.global_cpu_usage() as f64)
    }

    fn memory_percent(&mut self) -> Result<f64> {
        self.system.refresh_memory();
        let total = self.system.total_memory();
        if total == 0 {
            return Err(WarlockError::metric_collection("total memory reported as 0"));
        }
        Ok(percent(self.system.used_memory(), total))
    }

    fn swap_percent(&mut self) -> Result<f64> {
        self.system.refresh_memory();
        let total = self.system.total_swap();
        if total == 0 {
            return Ok(0.0);
        }
        Ok(percent(self.system.used_swap(), total))
    }

    fn root_disk_percent(&mut self) -> Result<f64> {
        self.disks.refresh(true);
        let root = self
            .disks
            .iter()
            .find(|disk| disk.mount_point() == Path::new(ROOT_MOUNT))
            .ok_or_else(|| {
                WarlockError::metric_collection(format!("no filesystem mounted at {}", ROOT_MOUNT))
            })?;

        let total = root.total_space();
        if total == 0 {
            return Err(WarlockError::metric_collection("root filesystem reports 0 bytes"));
        }
        let used = total.saturating_sub(root.available_space());
        Ok(percent(used, total))
    }

    fn disk_io(&mut self) -> Result<DiskIoCounters> {
        self.disks.refresh(true);
        if self.disks.list().is_empty() {
            return Err(WarlockError::metric_collection("no disks reported"));
        }

        // The same device can be mounted more than once.
        let mut seen = HashSet::new();
        let mut counters = DiskIoCounters::default();
        for disk in self.disks.iter() {
            if !seen.insert(disk.name().to_os_string()) {
                continue;
            }
            let usage = disk.usage();
            counters.read_bytes = counters.read_bytes.saturating_add(usage.total_read_bytes);
            counters.written_bytes = counters
                .written_bytes
                .saturating_add(usage.total_written_bytes);
        }
        Ok(counters)
    }

    fn net_io(&mut self) -> Result<NetIoCounters> {
        self.networks.refresh(true);
        if self.networks.list().is_empty() {
            return Err(WarlockError::metric_collection("no network interfaces reported"));
        }

        Ok(self
            .networks
            .values()
            .fold(NetIoCounters::default(), |acc, data| NetIoCounters {
                bytes_sent: acc.bytes_sent.saturating_add(data.total_transmitted()),
                bytes_recv: acc.bytes_recv.saturating_add(data.total_received()),
            }))
    }

    fn process_count(&mut self) -> Result<usize> {
        self.system.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing(),
        );

        // Linux threads show up as tasks; count processes only.
        let count = self
            .system
            .processes()
            .values()
            .filter(|process| process.thread_kind().is_none())
            .count();

        if count == 0 {
            return Err(WarlockError::metric_collection("process table is empty"));
        }
        Ok(count)
    }

    fn uptime_secs(&mut self) -> Result<u64> {
        Ok(System::uptime())
    }
}

fn percent(used: u64, total: u64) -> f64 {
    (used as f64 / total as f64) * 100.0
}
