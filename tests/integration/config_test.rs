use tempfile::TempDir;
use warlock::core::config::Config;
use warlock::core::monitor::{Comparator, Metric, Rule};

#[test]
fn test_config_default() {
    let config = Config::default();
    assert!(config.telegram.token.is_empty());
    assert!(config.alerts.is_empty());
    assert!(config.notification_channel().is_none());
}

#[test]
fn test_config_load_nonexistent_returns_default() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::load_from(&temp_dir.path().join("missing.yaml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_config_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("config.yaml");

    let mut config = Config::default();
    config.set_token("123:abc".to_string());
    config.set_chat_id("-1001".to_string());
    let rule = Rule::new("HighCPU", Metric::CpuPercent, Comparator::GreaterThan, 80.0).unwrap();
    config.add_alert(&rule);
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.rules(), vec![rule]);
}

#[test]
fn test_config_reads_existing_document() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.yaml");
    std::fs::write(
        &path,
        r#"
telegram:
  token: "123:abc"
  chat_id: "42"
alerts:
  - id: 7b1f0c1e-0000-4000-8000-000000000001
    name: HighCPU
    metric: cpu_percent
    comparator: ">"
    threshold: 80
  - id: 7b1f0c1e-0000-4000-8000-000000000002
    name: LowDisk
    metric: disk_percent_root
    comparator: "<"
    threshold: 5.5
"#,
    )
    .unwrap();

    let config = Config::load_from(&path).unwrap();
    let channel = config.notification_channel().unwrap();
    assert_eq!(channel.token, "123:abc");
    assert_eq!(channel.chat_id, "42");

    let rules = config.rules();
    assert_eq!(rules.len(), 2);
    assert_eq!(rules[0].comparator, Comparator::GreaterThan);
    assert_eq!(rules[0].threshold, 80.0);
    assert_eq!(rules[1].metric, Metric::DiskPercentRoot);
    assert_eq!(rules[1].comparator, Comparator::LessThan);
}

#[test]
fn test_unknown_comparator_rejected_at_load() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.yaml");
    std::fs::write(
        &path,
        "alerts:\n  - {id: x, name: a, metric: cpu_percent, comparator: \">=\", threshold: 1}\n",
    )
    .unwrap();

    assert!(Config::load_from(&path).is_err());
}

#[test]
fn test_non_numeric_threshold_rejected_at_load() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.yaml");
    std::fs::write(
        &path,
        "alerts:\n  - {id: x, name: a, metric: cpu_percent, comparator: \">\", threshold: high}\n",
    )
    .unwrap();

    assert!(Config::load_from(&path).is_err());
}

#[test]
fn test_unknown_metric_survives_save_but_is_not_evaluated() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.yaml");
    std::fs::write(
        &path,
        "alerts:\n  - {id: x, name: gpu, metric: gpu_percent, comparator: \">\", threshold: 90}\n",
    )
    .unwrap();

    let config = Config::load_from(&path).unwrap();
    assert!(config.rules().is_empty());

    config.save_to(&path).unwrap();
    let reloaded = Config::load_from(&path).unwrap();
    assert_eq!(reloaded.alerts.len(), 1);
    assert_eq!(reloaded.alerts[0].metric, "gpu_percent");
}
