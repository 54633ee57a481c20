use tempfile::TempDir;
use warlock::cli::build_cli;
use warlock::commands;
use warlock::core::config::Config;
use warlock::core::monitor::{Comparator, Metric, Rule};

fn saved_config_with_rule(dir: &TempDir) -> (std::path::PathBuf, Rule) {
    let path = dir.path().join("config.yaml");
    let rule = Rule::new("HighMem", Metric::MemoryPercent, Comparator::GreaterThan, 90.0).unwrap();
    let mut config = Config::default();
    config.add_alert(&rule);
    config.save_to(&path).unwrap();
    (path, rule)
}

#[test]
fn test_alerts_rm_removes_by_id() {
    let dir = TempDir::new().unwrap();
    let (path, rule) = saved_config_with_rule(&dir);

    let matches = build_cli()
        .try_get_matches_from(["warlock", "alerts", "rm", rule.id.as_str()])
        .unwrap();
    let alerts = matches.subcommand_matches("alerts").unwrap();
    commands::alerts::execute(alerts, &path).unwrap();

    assert!(Config::load_from(&path).unwrap().alerts.is_empty());
}

#[test]
fn test_alerts_rm_unknown_id_keeps_config() {
    let dir = TempDir::new().unwrap();
    let (path, _) = saved_config_with_rule(&dir);

    let matches = build_cli()
        .try_get_matches_from(["warlock", "a", "rm", "not-an-id"])
        .unwrap();
    let alerts = matches.subcommand_matches("alerts").unwrap();
    commands::alerts::execute(alerts, &path).unwrap();

    assert_eq!(Config::load_from(&path).unwrap().alerts.len(), 1);
}

#[test]
fn test_alerts_ls_on_empty_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");

    let matches = build_cli()
        .try_get_matches_from(["warlock", "alerts", "ls"])
        .unwrap();
    let alerts = matches.subcommand_matches("alerts").unwrap();
    assert!(commands::alerts::execute(alerts, &path).is_ok());
}

#[test]
fn test_configure_saves_credentials() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");

    let matches = build_cli()
        .try_get_matches_from(["warlock", "configure", "-b", "123:abc", "-c", "-1001"])
        .unwrap();
    let configure = matches.subcommand_matches("configure").unwrap();
    commands::configure::execute(configure, &path).unwrap();

    let channel = Config::load_from(&path).unwrap().notification_channel().unwrap();
    assert_eq!(channel.token, "123:abc");
    assert_eq!(channel.chat_id, "-1001");
}

#[test]
fn test_configure_without_flags_changes_nothing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");

    let matches = build_cli()
        .try_get_matches_from(["warlock", "configure"])
        .unwrap();
    let configure = matches.subcommand_matches("configure").unwrap();
    commands::configure::execute(configure, &path).unwrap();

    assert!(!path.exists());
}

#[test]
fn test_run_refuses_to_start_without_credentials() {
    let dir = TempDir::new().unwrap();
    let (path, _) = saved_config_with_rule(&dir);

    let matches = build_cli()
        .try_get_matches_from(["warlock", "run", "--interval", "1"])
        .unwrap();
    let run = matches.subcommand_matches("run").unwrap();
    let err = commands::run(run, &path).unwrap_err();

    assert!(err.to_string().contains("warlock configure"));
}

#[test]
fn test_metrics_ls() {
    let matches = build_cli()
        .try_get_matches_from(["warlock", "metrics", "ls"])
        .unwrap();
    let metrics = matches.subcommand_matches("metrics").unwrap();
    assert!(commands::metrics(metrics).is_ok());
}
