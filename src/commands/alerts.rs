use anyhow::{Context, Result};
use std::path::Path;

use crate::core::Config;
use crate::ui::{self, format_alert_line};

pub fn execute(matches: &clap::ArgMatches, config_path: &Path) -> Result<()> {
    match matches.subcommand() {
        Some(("ls", _)) => list_alerts(config_path),
        Some(("cr", _)) => create_alert(config_path),
        Some(("rm", sub_matches)) => match sub_matches.get_one::<String>("alert_id") {
            Some(id) => remove_alert(config_path, id),
            None => {
                ui::error("alert_id required for remove command");
                ui::dimmed("Usage: warlock alerts rm <ALERT_ID>");
                Ok(())
            }
        },
        _ => {
            println!("Use 'warlock alerts --help' for more information.");
            Ok(())
        }
    }
}

fn list_alerts(config_path: &Path) -> Result<()> {
    let config = Config::load_from(config_path).context("Failed to load config")?;

    if config.alerts.is_empty() {
        ui::warn("No alerts found.");
        ui::dimmed("Create one with 'warlock alerts cr'.");
        return Ok(());
    }

    ui::bold("Existing alerts:");
    for (i, alert) in config.alerts.iter().enumerate() {
        println!("{}", format_alert_line(i + 1, alert));
    }

    Ok(())
}

fn create_alert(config_path: &Path) -> Result<()> {
    let mut config = Config::load_from(config_path).context("Failed to load config")?;

    let rule = ui::prompt_new_rule()?;
    config.add_alert(&rule);
    config
        .save_to(config_path)
        .context("Failed to save config")?;

    log::debug!("Created alert {} ({})", rule.id, rule.condition());
    ui::success(&format!("Alert saved! ID: {}", rule.id));
    Ok(())
}

fn remove_alert(config_path: &Path, id: &str) -> Result<()> {
    let mut config = Config::load_from(config_path).context("Failed to load config")?;

    if !config.remove_alert(id) {
        ui::error(&format!("Alert with ID {} not found.", id));
        return Ok(());
    }

    config
        .save_to(config_path)
        .context("Failed to save config")?;
    ui::success(&format!("Alert with ID {} has been removed.", id));
    Ok(())
}
