use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::broadcast;
use warlock::core::monitor::{
    evaluate_rules, format_message, Comparator, CounterSource, DiskIoCounters, Dispatcher,
    Metric, MetricSnapshot, Monitor, MonitorState, NetIoCounters, Notifier, Rule, Sampler,
};
use warlock::{Result, WarlockError};

const MB: u64 = 1024 * 1024;

/// Counters that grow by a fixed amount on every read.
struct GrowingSource {
    disk: DiskIoCounters,
    net: NetIoCounters,
}

impl CounterSource for GrowingSource {
    fn cpu_percent(&mut self, _window: Duration) -> Result<f64> {
        Ok(12.0)
    }
    fn memory_percent(&mut self) -> Result<f64> {
        Ok(35.0)
    }
    fn swap_percent(&mut self) -> Result<f64> {
        Ok(0.0)
    }
    fn root_disk_percent(&mut self) -> Result<f64> {
        Err(WarlockError::metric_collection("statvfs failed"))
    }
    fn disk_io(&mut self) -> Result<DiskIoCounters> {
        self.disk.read_bytes += 50 * MB;
        Ok(self.disk)
    }
    fn net_io(&mut self) -> Result<NetIoCounters> {
        self.net.bytes_recv += 3 * MB;
        Ok(self.net)
    }
    fn process_count(&mut self) -> Result<usize> {
        Ok(200)
    }
    fn uptime_secs(&mut self) -> Result<u64> {
        Ok(120)
    }
}

#[derive(Clone, Default)]
struct Inbox {
    messages: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl Notifier for Inbox {
    async fn send_text(&self, text: &str) -> Result<()> {
        self.messages.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

fn growing_sampler() -> Sampler<GrowingSource> {
    Sampler::with_cpu_window(
        GrowingSource {
            disk: DiskIoCounters::default(),
            net: NetIoCounters::default(),
        },
        Duration::ZERO,
    )
}

#[tokio::test]
async fn test_high_cpu_end_to_end() {
    let rules = vec![Rule::new("HighCPU", Metric::CpuPercent, Comparator::GreaterThan, 80.0).unwrap()];
    let snapshot: MetricSnapshot = [(Metric::CpuPercent, 95.2)].into_iter().collect();

    let triggered: Vec<_> = evaluate_rules(&snapshot, &rules).collect();
    assert_eq!(triggered.len(), 1);
    assert_eq!(triggered[0].value, 95.2);

    let message = format_message(&triggered[0]);
    assert!(message.contains("HighCPU"));
    assert!(message.contains("cpu_percent"));
    assert!(message.contains("95.20"));

    let inbox = Inbox::default();
    let dispatcher = Dispatcher::new(inbox.clone());
    assert!(dispatcher.send(&triggered[0]).await.is_delivered());
    assert_eq!(inbox.messages.lock().unwrap().as_slice(), &[message]);
}

#[test]
fn test_rates_follow_counter_growth() {
    let mut sampler = growing_sampler();

    for _ in 0..3 {
        let snapshot = sampler.sample();
        assert_eq!(snapshot.get(Metric::DiskReadMbps), Some(50.0));
        assert_eq!(snapshot.get(Metric::NetRecvMbps), Some(3.0));
        assert_eq!(snapshot.get(Metric::NetSentMbps), Some(0.0));
        assert_eq!(snapshot.get(Metric::DiskPercentRoot), None);
        assert_eq!(snapshot.get(Metric::UptimeMinutes), Some(2.0));
    }
}

#[tokio::test(start_paused = true)]
async fn test_monitor_notifies_every_tick_while_breaching() {
    let rules = vec![
        Rule::new("DiskBusy", Metric::DiskReadMbps, Comparator::GreaterThan, 10.0).unwrap(),
        Rule::new("RootFull", Metric::DiskPercentRoot, Comparator::GreaterThan, 90.0).unwrap(),
        Rule::new("Quiet", Metric::NetSentMbps, Comparator::LessThan, 1.0).unwrap(),
    ];
    let inbox = Inbox::default();
    let mut monitor = Monitor::new(growing_sampler(), rules, Dispatcher::new(inbox.clone()))
        .with_interval(Duration::from_secs(1));

    let (tx, rx) = broadcast::channel(1);
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(2500)).await;
        let _ = tx.send(());
    });

    let summary = monitor.run(rx).await;

    assert_eq!(monitor.state(), MonitorState::Stopped);
    assert_eq!(summary.ticks, 3);
    assert_eq!(summary.triggered, 6);
    assert_eq!(summary.delivered, 6);

    let messages = inbox.messages.lock().unwrap();
    let order: Vec<bool> = messages.iter().map(|m| m.contains("DiskBusy")).collect();
    assert_eq!(order, vec![true, false, true, false, true, false]);
    assert!(messages.iter().all(|m| !m.contains("RootFull")));
}
